use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// 将章节文件的字节解码为文本
///
/// 1. 有 BOM 时按 BOM 指示的编码（UTF-8 / UTF-16LE / UTF-16BE）解码，并去掉 BOM
/// 2. 没有 BOM 时按严格 UTF-8 解码
/// 3. 换行统一为 `\n`
///
/// 出现任何非法字节序列都返回 None，不会替换为 U+FFFD
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => {
            debug!(encoding = encoding.name(), "检测到 BOM");
            (encoding, &bytes[bom_length..])
        }
        None => (UTF_8, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| normalize_newlines(&text))
}

/// `\r\n` 与单独的 `\r` 都转换为 `\n`
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
