/*
 * Responsibility
 * - ページの「シェル」レスポンス (UI のレンダリングはしない)
 */
use serde::Serialize;

use crate::i18n::Locale;

#[derive(Debug, Serialize)]
pub struct PageShell {
    pub page: &'static str,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl PageShell {
    pub fn new(page: &'static str, locale: Locale) -> Self {
        Self {
            page,
            locale,
            user_id: None,
            section: None,
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_section(mut self, section: Option<String>) -> Self {
        self.section = section;
        self
    }
}
