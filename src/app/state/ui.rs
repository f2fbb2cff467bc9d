use crate::camouflage::CamouflageTemplate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Bookshelf,
    Reader,
    Settings,
}

#[derive(Default)]
pub struct ShelfState {
    pub(in crate::app) selected: Option<Uuid>,
    pub(in crate::app) path_input: String,
}

#[derive(Default)]
pub struct CamouflageState {
    pub(in crate::app) active: bool,
    pub(in crate::app) template: CamouflageTemplate,
    /// The reading timer was running when the disguise went up.
    pub(in crate::app) resume_timer: bool,
}

impl CamouflageState {
    /// Unknown keys fall back to the default template.
    pub(in crate::app) fn with_template(key: &str) -> Self {
        CamouflageState {
            template: CamouflageTemplate::from_key(key).unwrap_or_default(),
            ..CamouflageState::default()
        }
    }
}

#[derive(Default)]
pub struct SettingsState {
    /// Section to return to when settings close.
    pub(in crate::app) return_to: Section,
    /// Editable chord text per hotkey row.
    pub(in crate::app) hotkey_inputs: Vec<String>,
    pub(in crate::app) custom_background: String,
    pub(in crate::app) custom_foreground: String,
    pub(in crate::app) preferences_path: String,
}
