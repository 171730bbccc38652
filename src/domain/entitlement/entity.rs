use serde::{Deserialize, Serialize};

use crate::domain::catalog::FontId;
use crate::domain::credential::CredentialId;

/// Grant of a credential to a single font
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entitlement {
    pub credential_id: CredentialId,
    pub font_id: FontId,
}

impl Entitlement {
    pub fn new(credential_id: CredentialId, font_id: FontId) -> Self {
        Self {
            credential_id,
            font_id,
        }
    }
}
