use super::*;
use agenda_client::validate;
use agenda_client::{data_url, LogoFile};

impl App {
    pub(super) fn format_editor(&mut self) {
        match validate::format_json(&self.editor.text()) {
            Ok(pretty) => {
                self.editor.set_text(&pretty);
                self.push_notice(Notice::info("JSON formatted"));
            }
            Err(message) => self.push_notice(Notice::error(format!("Invalid JSON: {message}"))),
        }
    }

    /// Acts on whatever was typed or pasted into the logo field.
    pub(super) fn commit_logo_input(&mut self) {
        if self.controller.is_none() {
            self.push_notice(Notice::warning(
                "Cannot change the logo while a request is in progress",
            ));
            return;
        }
        let value = self.logo_input.value().trim().to_string();
        if value.is_empty() {
            let mut surface = self.surface();
            if let Some(controller) = self.controller.as_mut() {
                controller.clear_logo(&mut surface);
            }
            return;
        }

        if data_url::is_data_url(&value) {
            match LogoFile::from_data_url(&value) {
                Ok(file) => self.select_logo(file),
                Err(e) => {
                    self.report_error("Pasted logo could not be decoded", &e);
                    self.push_notice(Notice::error(format!("Could not use pasted logo: {e}")));
                }
            }
            return;
        }

        self.load_logo_path(value);
    }

    pub(super) fn select_logo(&mut self, file: LogoFile) {
        let mut surface = self.surface();
        let Some(controller) = self.controller.as_mut() else {
            self.pending_logo = Some(file);
            self.push_notice(Notice::info(
                "Logo will be applied when the current request finishes",
            ));
            return;
        };
        if let Err(e) = controller.select_logo_file(file, &mut surface) {
            tracing::debug!("Logo not selected: {e}");
        }
    }

    pub(super) fn lookup_from_company_field(&mut self) {
        let company = self.company_input.value().trim().to_string();
        self.start_lookup((!company.is_empty()).then_some(company));
    }

    pub(super) fn accept_suggestion(&mut self) {
        let mut surface = self.surface();
        if let Some(controller) = self.controller.as_mut() {
            if !controller.accept_suggestion(&mut surface) {
                self.push_notice(Notice::info("No suggested logo to use"));
            }
        }
    }

    pub(super) fn reject_suggestion(&mut self) {
        let mut surface = self.surface();
        if let Some(controller) = self.controller.as_mut() {
            controller.reject_suggestion(&mut surface);
        }
    }

    pub(super) fn answer_confirm(&mut self, yes: bool) {
        if let Some(pending) = self.pending_confirm.take() {
            tracing::debug!(prompt = %pending.prompt, yes, "Confirm answered");
            let _ = pending.reply.send(yes);
        }
    }

    pub(super) fn dismiss_notice(&mut self) -> bool {
        self.notices.pop_front().is_some()
    }
}
