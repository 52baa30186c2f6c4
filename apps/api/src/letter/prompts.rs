// All LLM prompt text for the letter pipeline, one template set per locale.
// Stage code fills these with llm_client::prompts::fill_template and never
// branches on locale itself.

use crate::letter::request::Locale;

/// Every instruction string the pipeline sends for one locale.
#[derive(Debug)]
pub struct LocaleTemplates {
    pub extraction_system: &'static str,
    /// Replace: {raw_materials}
    pub extraction_prompt: &'static str,
    pub drafting_system: &'static str,
    /// Replace: {role}, {candidate_name}, {target_program}, {letter_date},
    ///          {claims}, {revision_feedback}
    pub drafting_prompt: &'static str,
    pub verification_system: &'static str,
    /// Replace: {claims}, {letter}
    pub verification_prompt: &'static str,
    /// One bullet per claim. Replace: {claim}, {evidence}, {confidence}
    pub claim_line: &'static str,
    /// Stands in for the claim list when extraction found nothing.
    pub no_claims: &'static str,
    /// Appended to the drafting prompt on revision passes when feedback is enabled.
    /// Replace: {sentences}
    pub revision_feedback: &'static str,
    pub document_header: &'static str,
    pub manual_header: &'static str,
}

pub fn templates_for(locale: Locale) -> &'static LocaleTemplates {
    match locale {
        Locale::English => &ENGLISH,
        Locale::TraditionalChinese => &TRADITIONAL_CHINESE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// English
// ────────────────────────────────────────────────────────────────────────────

pub static ENGLISH: LocaleTemplates = LocaleTemplates {
    extraction_system: "You are extracting ONLY verifiable facts for a recommendation letter. \
        You MUST respond with valid JSON only. \
        Do NOT include any text outside the JSON object. \
        Do NOT use markdown code fences.",
    extraction_prompt: r#"Raw materials:
{raw_materials}

Extract factual claims with supporting evidence.
Do NOT infer or exaggerate. Only extract claims directly supported by the raw materials.

Return a JSON object with this EXACT schema (no extra fields):
{
  "claims": [
    {
      "claim": "the factual claim",
      "evidence": "supporting quote or close paraphrase from the raw materials",
      "confidence": "high"
    }
  ]
}

"confidence" MUST be exactly one of "high", "medium", or "low".
If the raw materials contain no verifiable facts, return {"claims": []}."#,
    drafting_system: "You are an experienced academic recommender writing formal \
        recommendation letters. You write ONLY from the verified facts you are given. \
        Respond with the letter text only.",
    drafting_prompt: r#"You are a {role} writing a recommendation letter
for {candidate_name} who is applying to {target_program}.

IMPORTANT RULES:
1. You may ONLY use the verified facts listed below
2. Do NOT add any information not explicitly stated in the facts
3. Do NOT exaggerate or make inferences beyond what is stated, and never claim more certainty than a fact's confidence allows
4. Write in a formal, professional tone appropriate for an academic recommendation letter
5. Include proper letter formatting (date, salutation, body, closing)

Date of the letter: {letter_date}

Verified facts you can use:
{claims}
{revision_feedback}
Write a complete, formal recommendation letter that:
- Opens with your relationship to the candidate
- Discusses specific achievements and qualities (based only on the facts)
- Provides concrete examples from the verified facts
- Concludes with a strong recommendation
- Maintains a professional and sincere tone throughout

Format the letter properly with appropriate sections and paragraphs."#,
    verification_system: "You are verifying a recommendation letter against verified facts. \
        You MUST respond with valid JSON only. \
        Do NOT include any text outside the JSON object. \
        Do NOT use markdown code fences.",
    verification_prompt: r#"Verified facts:
{claims}

Letter:
{letter}

Your task:
1. Check each sentence in the letter against the verified facts
2. Identify any sentences that make claims not supported by the facts
3. Determine the overall hallucination risk level

If there are no verified facts, every sentence that asserts something about the candidate is unsupported.

Return a JSON object with this EXACT schema (no extra fields):
{
  "hallucination_risk": "low",
  "unsupported_sentences": ["sentence copied from the letter"]
}

- "hallucination_risk": "low" (if all claims are supported), "medium" (if some minor unsupported claims), or "high" (if major unsupported claims)
- "unsupported_sentences": list of sentences that are not supported by the verified facts, quoted from the letter"#,
    claim_line: "- {claim} (evidence: {evidence}, confidence: {confidence})",
    no_claims: "(No verified facts were found in the materials.)",
    revision_feedback: r#"
A previous draft was rejected because these sentences were not supported by the facts. Do NOT repeat them or anything like them:
{sentences}
"#,
    document_header: "=== Content from PDF ===",
    manual_header: "=== Additional Information ===",
};

// ────────────────────────────────────────────────────────────────────────────
// Traditional Chinese
// ────────────────────────────────────────────────────────────────────────────

pub static TRADITIONAL_CHINESE: LocaleTemplates = LocaleTemplates {
    extraction_system: "你正在為推薦信提取「僅可驗證」的事實。\
        你必須只回覆有效的 JSON。\
        不得在 JSON 物件之外包含任何文字。\
        不得使用 markdown 程式碼區塊。",
    extraction_prompt: r#"原始資料：
{raw_materials}

提取附有佐證的事實陳述。
不得推論或誇大。只提取原始資料直接支持的陳述。

請回傳完全符合以下結構的 JSON 物件（不得有額外欄位）：
{
  "claims": [
    {
      "claim": "事實陳述",
      "evidence": "來自原始資料的佐證引文或貼近原文的轉述",
      "confidence": "high"
    }
  ]
}

"confidence" 必須恰為 "high"、"medium" 或 "low" 其中之一。
若原始資料中沒有可驗證的事實，請回傳 {"claims": []}。"#,
    drafting_system: "你是一位經驗豐富、撰寫正式學術推薦信的推薦人。\
        你只根據所提供的已驗證事實撰寫。\
        只回覆推薦信內文。",
    drafting_prompt: r#"你是一位{role}，正在為申請{target_program}的{candidate_name}撰寫推薦信。

重要規則：
1. 你只能使用下列已驗證的事實
2. 不得加入事實中未明確陳述的任何資訊
3. 不得誇大或做出超出陳述內容的推論，也不得表達超過該事實可信度的確定程度
4. 使用適合學術推薦信的正式、專業語氣
5. 包含正確的書信格式（日期、稱謂、正文、結尾）

推薦信日期：{letter_date}

可使用的已驗證事實：
{claims}
{revision_feedback}
請撰寫一封完整、正式的推薦信，需要：
- 開頭說明你與候選人的關係
- 討論具體的成就與特質（僅根據事實）
- 提供來自已驗證事實的具體例子
- 以強烈推薦作結
- 全文保持專業且真誠的語氣

請以適當的段落與結構撰寫推薦信，並全文使用繁體中文。"#,
    verification_system: "你正在根據已驗證的事實審核一封推薦信。\
        你必須只回覆有效的 JSON。\
        不得在 JSON 物件之外包含任何文字。\
        不得使用 markdown 程式碼區塊。",
    verification_prompt: r#"已驗證的事實：
{claims}

推薦信：
{letter}

你的任務：
1. 逐句比對推薦信與已驗證的事實
2. 找出任何陳述未被事實支持的句子
3. 判斷整體的幻覺風險等級

若沒有任何已驗證的事實，則每個關於候選人的陳述句都視為未受支持。

請回傳完全符合以下結構的 JSON 物件（不得有額外欄位）：
{
  "hallucination_risk": "low",
  "unsupported_sentences": ["從推薦信中引用的句子"]
}

- "hallucination_risk"："low"（所有陳述皆有支持）、"medium"（有少量輕微未受支持的陳述）或 "high"（有重大未受支持的陳述）
- "unsupported_sentences"：未被已驗證事實支持的句子清單，須引用推薦信原文"#,
    claim_line: "- {claim}（證據：{evidence}，可信度：{confidence}）",
    no_claims: "（資料中未找到任何已驗證的事實。）",
    revision_feedback: r#"
先前的草稿因下列句子未受事實支持而被退回。不得重複這些句子或類似內容：
{sentences}
"#,
    document_header: "=== PDF 內容 ===",
    manual_header: "=== 額外資訊 ===",
};
