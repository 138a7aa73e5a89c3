/// The single message line of a page. Success and failure feedback share it,
/// and every write replaces whatever was there.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notice(Option<String>);

impl Notice {
    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = Some(text.into());
    }

    /// None if nothing has been said yet, or the last thing said was empty.
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref().filter(|text| !text.is_empty())
    }

    pub fn ui(&self, ui: &mut egui::Ui, color: egui::Color32) {
        if let Some(text) = self.text() {
            ui.label(egui::RichText::new(text).color(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut notice = Notice::default();
        assert_eq!(notice.text(), None);
        notice.set("first");
        notice.set(String::from("second"));
        assert_eq!(notice.text(), Some("second"));
    }

    #[test]
    fn empty_text_is_not_shown() {
        let mut notice = Notice::default();
        notice.set("");
        assert_eq!(notice.text(), None);
    }
}
