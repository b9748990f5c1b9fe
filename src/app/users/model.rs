//! 用户数据模型

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<String>,
    pub hobby: Option<String>,
}

impl User {
    pub fn new(id: i64, name: &str, age: &str, hobby: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            age: Some(age.to_string()),
            hobby: Some(hobby.to_string()),
        }
    }
}

/// 启动时写入的示例用户
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Gustav Liffner", "26", "Climbing"),
        User::new(2, "Björn Liffner", "56", "Sailing"),
        User::new(3, "Sofie Liffner", "45", "Running"),
        User::new(4, "Ines Liffner", "16", "Fotboll"),
    ]
}

/// 请求中的单个字段
///
/// 区分「未提供」「显式 null」「给出了值」三种状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldInput {
    #[default]
    Missing,
    Null,
    Given(Scalar),
}

/// 字段允许的 JSON 标量
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    /// 空字符串、0 和 false 视为假值
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            Scalar::Bool(b) => *b,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

impl FieldInput {
    /// 创建时使用：给出的值（包括假值）原样保存为文本，其余为 null
    pub fn into_value(self) -> Option<String> {
        match self {
            FieldInput::Given(scalar) => Some(scalar.into_text()),
            FieldInput::Missing | FieldInput::Null => None,
        }
    }

    /// 更新时使用：只有真值才算提供，否则保留原值
    pub fn supplied(self) -> Option<String> {
        match self {
            FieldInput::Given(scalar) if scalar.is_truthy() => Some(scalar.into_text()),
            _ => None,
        }
    }

    pub fn apply_to(self, current: &mut Option<String>) {
        if let Some(value) = self.supplied() {
            *current = Some(value);
        }
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Scalar>::deserialize(deserializer)? {
            Some(scalar) => FieldInput::Given(scalar),
            None => FieldInput::Null,
        })
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Given(Scalar::Text(value.to_string()))
    }
}

/// 创建用户请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: FieldInput,
    #[serde(default)]
    pub age: FieldInput,
    #[serde(default)]
    pub hobby: FieldInput,
}

/// 更新用户请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: FieldInput,
    #[serde(default)]
    pub age: FieldInput,
    #[serde(default)]
    pub hobby: FieldInput,
}

/// 带用户数据的响应：`{ "message": ..., "user": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

/// 路径中的用户 id
///
/// 按宽松整数规则解析：跳过前导空白，可选符号和 `0x` 前缀，
/// 取最长的数字前缀，忽略其后的字符。没有数字时为 `NaN`。
/// 超出 i64 范围的数字按浮点数保留，消息中照常显示，
/// 但与 `NaN` 一样不匹配任何用户。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserId {
    Int(i64),
    Large(f64),
    NaN,
}

impl UserId {
    pub fn parse(raw: &str) -> Self {
        parse_leading_int(raw)
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            UserId::Int(id) => Some(*id),
            UserId::Large(_) | UserId::NaN => None,
        }
    }

    pub fn matches(&self, id: i64) -> bool {
        self.value() == Some(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Int(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(id) => write!(f, "{id}"),
            UserId::Large(value) => write!(f, "{value}"),
            UserId::NaN => f.write_str("NaN"),
        }
    }
}

fn parse_leading_int(raw: &str) -> UserId {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(s.len(), |(i, _)| i);
    let digits = &s[..end];
    if digits.is_empty() {
        return UserId::NaN;
    }

    match i64::from_str_radix(digits, radix) {
        Ok(magnitude) => UserId::Int(if negative { -magnitude } else { magnitude }),
        Err(_) => {
            let magnitude = if radix == 10 {
                digits.parse::<f64>().unwrap_or(f64::INFINITY)
            } else {
                digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
            };
            UserId::Large(if negative { -magnitude } else { magnitude })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_nulls() {
        let user = User {
            id: 7,
            name: None,
            age: Some("30".into()),
            hobby: None,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": 7, "name": null, "age": "30", "hobby": null })
        );
    }

    #[test]
    fn test_field_input_states() {
        let req: UpdateUserRequest =
            serde_json::from_value(json!({ "name": null, "age": "30" })).unwrap();
        assert_eq!(req.name, FieldInput::Null);
        assert_eq!(req.age, FieldInput::from("30"));
        assert_eq!(req.hobby, FieldInput::Missing);
    }

    #[test]
    fn test_field_input_numbers_and_bools() {
        let req: CreateUserRequest =
            serde_json::from_value(json!({ "age": 30, "hobby": true, "name": 0 })).unwrap();
        assert_eq!(req.age.into_value(), Some("30".to_string()));
        assert_eq!(req.hobby.into_value(), Some("true".to_string()));
        assert_eq!(req.name.into_value(), Some("0".to_string()));
    }

    #[test]
    fn test_field_input_rejects_objects() {
        let result = serde_json::from_value::<CreateUserRequest>(json!({ "name": { "first": "A" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_falsy_values_are_not_supplied() {
        assert_eq!(FieldInput::from("").supplied(), None);
        assert_eq!(FieldInput::Given(Scalar::Number(0.into())).supplied(), None);
        assert_eq!(FieldInput::Given(Scalar::Bool(false)).supplied(), None);
        assert_eq!(FieldInput::Null.supplied(), None);
        assert_eq!(FieldInput::Missing.supplied(), None);
        assert_eq!(FieldInput::from("x").supplied(), Some("x".to_string()));
        assert_eq!(
            FieldInput::Given(Scalar::Number(12.into())).supplied(),
            Some("12".to_string())
        );
    }

    #[test]
    fn test_apply_to_keeps_previous_value() {
        let mut name = Some("Gustav".to_string());
        FieldInput::from("").apply_to(&mut name);
        assert_eq!(name.as_deref(), Some("Gustav"));

        FieldInput::from("Anna").apply_to(&mut name);
        assert_eq!(name.as_deref(), Some("Anna"));
    }

    #[test]
    fn test_user_id_parsing() {
        assert_eq!(UserId::parse("3").value(), Some(3));
        assert_eq!(UserId::parse("  42").value(), Some(42));
        assert_eq!(UserId::parse("12abc").value(), Some(12));
        assert_eq!(UserId::parse("-5").value(), Some(-5));
        assert_eq!(UserId::parse("+7").value(), Some(7));
        assert_eq!(UserId::parse("0x1A").value(), Some(26));
        assert_eq!(UserId::parse("1.9").value(), Some(1));
        assert_eq!(UserId::parse("abc").value(), None);
        assert_eq!(UserId::parse("").value(), None);
        assert_eq!(UserId::parse("-").value(), None);
        assert_eq!(UserId::parse("99999999999999999999").value(), None);
    }

    #[test]
    fn test_large_user_id_keeps_its_digits() {
        let id = UserId::parse("99999999999999999999");
        assert_eq!(id.to_string(), "100000000000000000000");
        assert!(!id.matches(i64::MAX));

        let id = UserId::parse("-123456789012345678901");
        assert_eq!(id.to_string(), "-123456789012345680000");
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::parse("12").to_string(), "12");
        assert_eq!(UserId::parse("abc").to_string(), "NaN");
        assert!(UserId::parse("1").matches(1));
        assert!(!UserId::parse("abc").matches(0));
    }
}
