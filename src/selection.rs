use rust_i18n::t;

use crate::model::SpawnPoint;
use crate::notice::Notice;

/// The spawn point the player picked on the current page, if any.
/// Lives only as long as the page, there is no way to unselect.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default, Clone)]
pub struct SpawnSelection {
    selected: Option<SpawnPoint>,
}

impl SpawnSelection {
    pub fn select(&mut self, spawn_point: &SpawnPoint, notice: &mut Notice) {
        notice.set(t!("notice.selected", name = spawn_point.name));
        self.selected = Some(spawn_point.clone());
    }

    pub fn selected(&self) -> Option<&SpawnPoint> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, spawn_point: &SpawnPoint) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.id == spawn_point.id)
    }
}
