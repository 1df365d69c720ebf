use typed_builder::TypedBuilder;

use crate::FRAME_CYCLES;

/// Power-on contents of work RAM and high RAM.
///
/// Real hardware powers up with noise in both. `Pseudorandom` fills them
/// from a fixed-seed xorshift so runs stay reproducible while software
/// still cannot rely on a zeroed pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RamInit {
    #[default]
    Pseudorandom,
    Zeroed,
}

/// Construction-time options for [`crate::Emulator`].
///
/// ```
/// use pocketdmg::{EmulatorConfig, RamInit};
///
/// let config = EmulatorConfig::builder().ram_init(RamInit::Zeroed).build();
/// assert_eq!(config.frame_cycle_budget, pocketdmg::FRAME_CYCLES);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct EmulatorConfig {
    #[builder(default)]
    pub ram_init: RamInit,
    /// Upper bound on the cycles one `render_frame` call runs while the
    /// LCD is switched off and no frame can complete.
    #[builder(default = FRAME_CYCLES)]
    pub frame_cycle_budget: u32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
