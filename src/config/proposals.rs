//! Proposal defaults

use serde::Deserialize;
use std::collections::HashSet;

use super::error::ValidationError;
use crate::application::ChecklistDefaults;

/// Channel lists used when a creation request omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposalsConfig {
    /// Payment channels for new proposals
    #[serde(default = "default_payment_channels")]
    pub payment_channels: Vec<String>,

    /// Communication channels for new proposals
    #[serde(default = "default_communication_channels")]
    pub communication_channels: Vec<String>,
}

impl ProposalsConfig {
    pub fn checklist_defaults(&self) -> ChecklistDefaults {
        ChecklistDefaults {
            payment_channels: self.payment_channels.clone(),
            communication_channels: self.communication_channels.clone(),
        }
    }

    /// Validate channel lists
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_channels("payment_channels", &self.payment_channels)?;
        check_channels("communication_channels", &self.communication_channels)?;
        Ok(())
    }
}

fn check_channels(list: &'static str, names: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyChannelName(list));
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateChannel {
                list,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

impl Default for ProposalsConfig {
    fn default() -> Self {
        Self {
            payment_channels: default_payment_channels(),
            communication_channels: default_communication_channels(),
        }
    }
}

fn default_payment_channels() -> Vec<String> {
    ["boleto", "pix", "credit_card"].map(String::from).to_vec()
}

fn default_communication_channels() -> Vec<String> {
    ["email", "sms", "whatsapp"].map(String::from).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProposalsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.payment_channels, vec!["boleto", "pix", "credit_card"]);
        assert_eq!(config.communication_channels, vec!["email", "sms", "whatsapp"]);
    }

    #[test]
    fn test_checklist_defaults_copies_lists() {
        let defaults = ProposalsConfig::default().checklist_defaults();
        assert_eq!(defaults.payment_channels.len(), 3);
        assert_eq!(defaults.communication_channels[0], "email");
    }

    #[test]
    fn test_empty_channel_name_rejected() {
        let config = ProposalsConfig {
            payment_channels: vec!["pix".into(), "  ".into()],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyChannelName("payment_channels"))
        );
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let config = ProposalsConfig {
            communication_channels: vec!["sms".into(), "sms".into()],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateChannel {
                list: "communication_channels",
                name: "sms".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_list_is_allowed() {
        let config = ProposalsConfig {
            communication_channels: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
