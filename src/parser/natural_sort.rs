use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

// Unicode 模式下 `\d` 即 Nd（十进制数字），包括全角数字
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static SINGLE_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\d\z").unwrap());

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    c.is_ascii_digit() || SINGLE_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// 十进制数字字符的数值
///
/// Nd 字符总是以 0..9 连续成组出现，相邻的组首尾相接；
/// 向前找到连续 Nd 区间的起点（必为某组的 0），偏移量模 10 即为数值
fn digit_value(c: char) -> u32 {
    if let Some(value) = c.to_digit(10) {
        return value;
    }

    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    (c as u32 - start) % 10
}

/// 数字段
///
/// 把每个十进制数字（含全角等非 ASCII 数字）换算为 ASCII 数字，
/// 去掉前导零后保存，按数值比较，长度不受整数类型限制
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRun(String);

impl NumericRun {
    pub fn new(digits: &str) -> Self {
        let ascii: String = digits
            .chars()
            .filter_map(|c| char::from_digit(digit_value(c), 10))
            .collect();
        let trimmed = ascii.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    #[cfg(test)]
    fn value(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for NumericRun {
    fn cmp(&self, other: &Self) -> Ordering {
        // 无前导零时，位数多的数值更大
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for NumericRun {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 排序键中的一个片段
///
/// 变体声明顺序决定跨类型比较：文本片段总是排在数字片段之前
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortToken {
    Text(String),
    Number(NumericRun),
}

/// 自然排序键
///
/// 先逐片段比较；片段完全相同时（如 `c01` 与 `c1`）再按原始文件名比较
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    tokens: Vec<SortToken>,
    raw: String,
}

impl NaturalKey {
    pub fn tokens(&self) -> &[SortToken] {
        &self.tokens
    }
}

/// 生成文件名的自然排序键
///
/// 按连续数字切分，文本与数字片段交替出现，首尾可能是空文本片段：
/// `ch10b.xhtml` -> `["ch", 10, "b.xhtml"]`
pub fn natural_key(name: &str) -> NaturalKey {
    let mut tokens = Vec::new();
    let mut last = 0;

    for digits in DIGIT_RUN.find_iter(name) {
        tokens.push(SortToken::Text(name[last..digits.start()].to_string()));
        tokens.push(SortToken::Number(NumericRun::new(digits.as_str())));
        last = digits.end();
    }
    tokens.push(SortToken::Text(name[last..].to_string()));

    NaturalKey {
        tokens,
        raw: name.to_string(),
    }
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// 按自然顺序就地排序文件名
pub fn sort_naturally(names: &mut [String]) {
    names.sort_by_cached_key(|name| natural_key(name));
}
