//! Plain-text export of a finished letter.

use chrono::NaiveDateTime;

pub const TXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// `recommendation_letter_YYYYMMDD_HHMMSS.txt`, stamped with the export time.
pub fn export_filename(at: NaiveDateTime) -> String {
    format!("recommendation_letter_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// UTF-8 body with `\n` line endings and exactly one trailing newline.
pub fn render_txt(letter: &str) -> Vec<u8> {
    let mut body = letter.replace("\r\n", "\n").trim_end().to_string();
    body.push('\n');
    body.into_bytes()
}
