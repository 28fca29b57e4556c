use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct RemoteEmoji {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdminListResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub emoji: Vec<RemoteEmoji>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AddResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}
