use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Letter tag of one of a question's four options.
///
/// Stored as TEXT in the database and serialized as "A".."D" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionTag {
    A,
    B,
    C,
    D,
}

impl OptionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionTag::A => "A",
            OptionTag::B => "B",
            OptionTag::C => "C",
            OptionTag::D => "D",
        }
    }
}

impl std::str::FromStr for OptionTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionTag::A),
            "B" => Ok(OptionTag::B),
            "C" => Ok(OptionTag::C),
            "D" => Ok(OptionTag::D),
            other => Err(format!("invalid option tag: {}", other)),
        }
    }
}

impl std::fmt::Display for OptionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl sqlx::Type<sqlx::Postgres> for OptionTag {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OptionTag {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        raw.parse().map_err(Into::into)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for OptionTag {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> sqlx::encode::IsNull {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: OptionTag,
    #[serde(rename = "order")]
    pub order_index: i32,
}

impl Question {
    /// Text of the option carrying the given tag.
    pub fn option_text(&self, tag: OptionTag) -> &str {
        match tag {
            OptionTag::A => &self.option_a,
            OptionTag::B => &self.option_b,
            OptionTag::C => &self.option_c,
            OptionTag::D => &self.option_d,
        }
    }
}
