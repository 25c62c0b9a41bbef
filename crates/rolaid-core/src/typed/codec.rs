//! Result encoding - 署名対象になる結果レコードの JSON bytes
//!
//! 同じ task に対して他の performer と同じ bytes を出す（executor がこの bytes に署名する）:
//! - キー順は構造体の宣言順。結果レコードはキーをソート順で宣言する
//! - `<` `>` `&` と U+2028 / U+2029 は `\uXXXX` にエスケープする
//!
//! それ以外のエスケープ（制御文字など）は serde_json の既定と同じ。

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

/// Compact formatter that additionally escapes HTML-significant characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        CompactFormatter.write_string_fragment(writer, &fragment[start..])
    }
}

/// Encodes a result record as compact, HTML-escaped JSON.
pub fn encode_result<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut out, HtmlSafeFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}
