use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteAccountResponse {
    pub fn done() -> Self {
        Self {
            success: true,
            message: "Account deleted successfully".to_string(),
        }
    }
}
