//! Template admin editor

use super::{PageLifecycle, SubmitOutcome};
use crate::api::ResourceId;
use crate::forms::rules::template_rules;
use crate::forms::FormState;
use crate::mutation::{PendingDelete, TemplateAdmin};
use crate::templates::{ColorScheme, FontPair, Template, TemplateInput};

/// Create or edit one template
///
/// Besides the fields checked by [`template_rules`], the form carries
/// `is_premium`, `is_active` (`"true"`/`"false"`), `features` (one per
/// line) and the optional `heading_font`/`body_font`.
#[derive(Debug, Clone)]
pub struct TemplateEditorPage {
    form: FormState,
    editing: Option<(ResourceId, String)>,
    banner: Option<String>,
    lifecycle: PageLifecycle,
}

impl Default for TemplateEditorPage {
    fn default() -> Self {
        Self::create()
    }
}

impl TemplateEditorPage {
    /// Blank editor for a new template, pre-filled with the default colors
    #[must_use]
    pub fn create() -> Self {
        let mut form = FormState::new(template_rules());
        let colors = ColorScheme::default();
        let fonts = FontPair::default();
        for (field, value) in [
            ("primary_color", colors.primary),
            ("secondary_color", colors.secondary),
            ("text_color", colors.text),
            ("background_color", colors.background),
            ("heading_font", fonts.heading),
            ("body_font", fonts.body),
            ("is_premium", "false".to_string()),
            ("is_active", "true".to_string()),
        ] {
            form.set_value(field, value);
        }
        Self {
            form,
            editing: None,
            banner: None,
            lifecycle: PageLifecycle::new(),
        }
    }

    /// Editor pre-filled from an existing template
    #[must_use]
    pub fn edit(template: &Template) -> Self {
        let mut page = Self::create();
        let form = &mut page.form;
        form.set_value("name", template.name.clone());
        form.set_value("description", template.description.clone());
        form.set_value("category", template.category.as_str());
        form.set_value("thumbnail", template.thumbnail.clone());
        form.set_value("primary_color", template.default_colors.primary.clone());
        form.set_value("secondary_color", template.default_colors.secondary.clone());
        form.set_value("text_color", template.default_colors.text.clone());
        form.set_value("background_color", template.default_colors.background.clone());
        form.set_value("heading_font", template.default_fonts.heading.clone());
        form.set_value("body_font", template.default_fonts.body.clone());
        form.set_value("features", template.features.join("\n"));
        form.set_value("is_premium", template.is_premium.to_string());
        form.set_value("is_active", template.is_active.to_string());
        page.editing = Some((template.id.clone(), template.name.clone()));
        page
    }

    /// Whether this edits an existing template
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Form state
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Form state, for input events
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Error banner above the form
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Mounted flag
    #[must_use]
    pub const fn lifecycle(&self) -> &PageLifecycle {
        &self.lifecycle
    }

    /// Start deleting the template being edited; `None` for a new one
    #[must_use]
    pub fn request_delete(&self) -> Option<PendingDelete> {
        self.editing
            .as_ref()
            .map(|(id, name)| PendingDelete::new(id.clone(), name.clone()))
    }

    /// Validate and save
    pub async fn submit(&mut self, admin: &TemplateAdmin) -> SubmitOutcome<Template> {
        self.banner = None;
        if !self.form.validate_all() {
            return SubmitOutcome::Invalid;
        }
        let input = match TemplateInput::from_form(self.form.values()) {
            Ok(input) => input,
            Err(errors) => {
                for (field, error) in errors.iter() {
                    self.form.set_error(field, error.message.clone());
                }
                return SubmitOutcome::Invalid;
            }
        };
        let Some(_guard) = self.form.latch().try_begin() else {
            return SubmitOutcome::Busy;
        };

        let result = match &self.editing {
            Some((id, _)) => admin.update(id.clone(), input).await,
            None => admin.create(input).await,
        };

        if !self.lifecycle.is_mounted() {
            return SubmitOutcome::Discarded;
        }
        match result {
            Ok(template) => {
                self.editing = Some((template.id.clone(), template.name.clone()));
                SubmitOutcome::Succeeded(template)
            }
            Err(e) => {
                self.banner = Some(e.message.clone());
                SubmitOutcome::Failed(e.message)
            }
        }
    }
}
