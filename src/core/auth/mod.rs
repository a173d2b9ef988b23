use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

pub const OFFLINE_CLIENT_ID: &str = "00000000402B5328";

/// Who the game session is launched as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub username: String,
    pub uuid: String,
    pub access_token: String,
    pub xuid: String,
    pub user_type: String,
    pub client_id: String,
}

impl Default for PlayerIdentity {
    fn default() -> Self {
        Self::offline("Player")
    }
}

impl PlayerIdentity {
    /// Offline identity. The UUID is the name-based (MD5, version 3) UUID of
    /// `OfflinePlayer:<name>`, matching what servers derive in offline mode.
    pub fn offline(username: &str) -> Self {
        let username = match username.trim() {
            "" => "Player",
            name => name,
        };

        Self {
            username: username.to_string(),
            uuid: offline_uuid(username).simple().to_string(),
            access_token: "0".into(),
            xuid: "0".into(),
            user_type: "legacy".into(),
            client_id: OFFLINE_CLIENT_ID.into(),
        }
    }
}

pub fn offline_uuid(username: &str) -> uuid::Uuid {
    let digest = Md5::digest(format!("OfflinePlayer:{username}").as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    uuid::Builder::from_md5_bytes(bytes).into_uuid()
}
