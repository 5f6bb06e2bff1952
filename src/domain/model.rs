use serde::{Deserialize, Serialize};

/// 從資料來源讀出的一筆聯絡人；沒有姓名時 first/last 為空字串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl Record {
    pub fn email_only(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            ..Self::default()
        }
    }

    pub fn with_name(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email_address: email_address.into(),
        }
    }

    /// 只有姓與名都有值才算有姓名資料
    pub fn has_full_name(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

/// 查詢結果的欄位形狀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// `email`
    EmailOnly,
    /// `first, last, email`
    NameAndEmail,
}

impl QueryShape {
    pub fn column_count(self) -> usize {
        match self {
            QueryShape::EmailOnly => 1,
            QueryShape::NameAndEmail => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeFields {
    #[serde(rename = "FNAME")]
    pub first_name: String,
    #[serde(rename = "LNAME")]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberPayload {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_fields: Option<MergeFields>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub list_id: String,
    pub update_existing: bool,
    pub double_optin: bool,
    pub entries: Vec<SubscriberPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberError {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub added_count: u64,
    pub updated_count: u64,
    pub error_count: u64,
    pub errors: Vec<SubscriberError>,
}

impl BatchResponse {
    /// 合併分批送出的結果：計數相加，錯誤依序串接
    pub fn absorb(&mut self, other: BatchResponse) {
        self.added_count += other.added_count;
        self.updated_count += other.updated_count;
        self.error_count += other.error_count;
        self.errors.extend(other.errors);
    }
}

/// 一次執行的最終結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Submitted(BatchResponse),
    DryRun { entries: usize },
}
