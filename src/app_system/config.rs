use crate::view_model::{NoticeDuration, PersonValidator};

/// Settings for one roster system.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub buffer_size: usize,
    pub seed_on_start: bool,
    pub name_min: usize,
    pub name_max: usize,
    pub notice_duration: NoticeDuration,
}

// Builder setters, chained from `RosterConfig::default()`
impl RosterConfig {
    /// Capacity of the request channel in front of the store actor
    pub fn set_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Fill an empty store with demo people during startup
    pub fn set_seed_on_start(mut self, seed_on_start: bool) -> Self {
        self.seed_on_start = seed_on_start;
        self
    }

    pub fn set_name_bounds(mut self, name_min: usize, name_max: usize) -> Self {
        self.name_min = name_min;
        self.name_max = name_max;
        self
    }

    pub fn set_notice_duration(mut self, notice_duration: NoticeDuration) -> Self {
        self.notice_duration = notice_duration;
        self
    }

    pub fn validator(&self) -> PersonValidator {
        PersonValidator::new(self.name_min, self.name_max)
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            seed_on_start: true,
            name_min: 2,
            name_max: 64,
            notice_duration: NoticeDuration::Long,
        }
    }
}

#[cfg(test)]
impl RosterConfig {
    pub fn new_test() -> Self {
        RosterConfig::default()
            .set_buffer_size(8)
            .set_seed_on_start(false)
    }
}
