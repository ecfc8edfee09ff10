use tracing::{debug, info, warn};

use crate::error::Refusal;
use crate::host::{InputSource, TimeHost};
use crate::mode::{Region, TimeMode, WarpAction};
use crate::settings::SettingsStore;
use crate::table::{ModeTable, PAUSE_INDEX};

/// Where the controller currently is in the table, and where unpausing goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeIndexState {
    pub current_index: usize,
    pub unpause_index: usize,
}

/// Time warp state machine for one simulation scene.
///
/// Create one when the scene starts and drop it when the scene ends. All
/// methods run to completion on the simulation tick.
pub struct ModeController {
    table: ModeTable,
    state: ModeIndexState,
    seen_revision: Option<u64>, // None until the first rebuild
    pause_maintains_warp_speed: bool,
}

impl ModeController {
    pub fn new(store: &SettingsStore) -> Self {
        let table = ModeTable::rebuild(store.settings());
        let normal = table.normal_index();
        Self {
            table,
            state: ModeIndexState {
                current_index: normal,
                unpause_index: normal,
            },
            seen_revision: None,
            pause_maintains_warp_speed: store.settings().pause_maintains_warp_speed,
        }
    }

    pub fn table(&self) -> &ModeTable {
        &self.table
    }

    pub fn state(&self) -> ModeIndexState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn unpause_index(&self) -> usize {
        self.state.unpause_index
    }

    pub fn current_mode(&self) -> &TimeMode {
        &self.table.modes()[self.state.current_index]
    }

    pub fn current_region(&self) -> Option<Region> {
        self.table.region_of(self.state.current_index)
    }

    pub fn is_paused(&self) -> bool {
        self.state.current_index == PAUSE_INDEX
    }

    pub fn is_rebuild_pending(&self, store: &SettingsStore) -> bool {
        self.seen_revision != Some(store.revision())
    }

    /// One scheduling tick: rebuild if the settings moved, then dispatch at
    /// most one keybind. Does nothing outside the simulation scene.
    pub fn tick<H, I>(
        &mut self,
        host: &mut H,
        input: &I,
        store: &SettingsStore,
    ) -> Option<WarpAction>
    where
        H: TimeHost + ?Sized,
        I: InputSource + ?Sized,
    {
        if !host.is_in_simulation_scene() {
            return None;
        }
        self.maybe_rebuild(host, store);
        self.handle_input(host, input)
    }

    /// Swaps in a freshly built table when the store revision differs from
    /// the one last built. Returns true if a rebuild happened.
    pub fn maybe_rebuild<H>(&mut self, host: &mut H, store: &SettingsStore) -> bool
    where
        H: TimeHost + ?Sized,
    {
        let revision = store.revision();
        if self.seen_revision == Some(revision) {
            return false;
        }

        self.table = ModeTable::rebuild(store.settings());
        self.pause_maintains_warp_speed = store.settings().pause_maintains_warp_speed;
        self.state.unpause_index = self.table.normal_index();
        if self.state.current_index >= self.table.len() {
            warn!(
                "mode index {} no longer in table, falling back to normal speed",
                self.state.current_index
            );
            self.state.current_index = self.table.normal_index();
        }
        self.seen_revision = Some(revision);

        info!(
            "rebuilt time mode table (revision {}): {} modes, slow-mo slot {}, fast-forward slot {}, first warp {}",
            revision,
            self.table.len(),
            self.table.slow_motion_slot(),
            self.table.fast_forward_slot(),
            self.table.first_warp_index()
        );
        host.table_rebuilt(&self.table);
        true
    }

    /// Polls the mirrored time-panel actions in priority order and performs
    /// the first one pressed. Returns the action that was dispatched.
    pub fn handle_input<H, I>(&mut self, host: &mut H, input: &I) -> Option<WarpAction>
    where
        H: TimeHost + ?Sized,
        I: InputSource + ?Sized,
    {
        let action = WarpAction::ALL
            .into_iter()
            .find(|&action| input.is_just_pressed(action))?;

        debug!("keybind: {}", action.label());
        if let Err(refusal) = self.perform(host, action) {
            debug!("{} not performed: {}", action.label(), refusal);
        }
        Some(action)
    }

    /// Runs the transition behind one of the time-panel buttons.
    pub fn perform<H>(&mut self, host: &mut H, action: WarpAction) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        match action {
            WarpAction::SlowMotion => self.set_slow_motion_mode(host),
            WarpAction::NormalSpeed => self.set_normal_speed_mode(host),
            WarpAction::FastForward => self.set_fast_forward_mode(host),
            WarpAction::Warp => self.set_warp_mode(host),
        }
    }

    /// Transition primitive. Entering pause from any other mode remembers
    /// that mode for the next unpause, whatever the outcome.
    pub fn set_mode<H>(&mut self, host: &mut H, target: usize, force: bool) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        if target == PAUSE_INDEX && self.state.current_index != PAUSE_INDEX {
            self.state.unpause_index = self.state.current_index;
        }

        let Some(mode) = self.table.get(target) else {
            let refusal = Refusal::new(format!("No time warp mode at index {}.", target));
            warn!("{}", refusal);
            host.show_user_message(&refusal.reason);
            return Err(refusal);
        };

        let admitted = if force {
            Ok(())
        } else {
            host.can_enter_mode(target, mode)
        };
        if let Err(refusal) = admitted.and_then(|()| host.apply_mode(target, mode)) {
            warn!("time mode {} refused: {}", target, refusal);
            host.show_user_message(&refusal.reason);
            return Err(refusal);
        }

        debug!(
            "time mode {} -> {} ({}x)",
            self.state.current_index,
            target,
            mode.multiplier()
        );
        self.state.current_index = target;
        Ok(())
    }

    /// Enters the slow-motion slot unless already slowed down; pressing it
    /// again keeps whatever slow-motion speed was picked.
    pub fn set_slow_motion_mode<H>(&mut self, host: &mut H) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        if self.table.is_in(self.state.current_index, Region::SlowMotion) {
            return Ok(());
        }
        self.set_mode(host, self.table.slow_motion_slot(), false)
    }

    pub fn set_normal_speed_mode<H>(&mut self, host: &mut H) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        self.set_mode(host, self.table.normal_index(), false)
    }

    pub fn set_fast_forward_mode<H>(&mut self, host: &mut H) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        if self.table.is_in(self.state.current_index, Region::FastForward) {
            return Ok(());
        }
        self.set_mode(host, self.table.fast_forward_slot(), false)
    }

    /// Enters the first warp mode unless already warping. Admissibility is
    /// checked up front so a refusal is reported without touching the index.
    pub fn set_warp_mode<H>(&mut self, host: &mut H) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        if self.table.is_in(self.state.current_index, Region::Warp) {
            return Ok(());
        }
        let first_warp = self.table.first_warp_index();
        if let Some(mode) = self.table.get(first_warp) {
            if let Err(refusal) = host.can_enter_mode(first_warp, mode) {
                warn!("warp refused: {}", refusal);
                host.show_user_message(&refusal.reason);
                return Err(refusal);
            }
        }
        self.set_mode(host, first_warp, false)
    }

    /// Pausing remembers the current mode; unpausing goes back to it, or to
    /// normal speed when `pause_maintains_warp_speed` is off.
    pub fn request_pause_change<H>(&mut self, host: &mut H, paused: bool) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        if paused {
            self.set_mode(host, PAUSE_INDEX, false)
        } else if self.pause_maintains_warp_speed {
            self.set_mode(host, self.state.unpause_index, false)
        } else {
            self.set_mode(host, self.table.normal_index(), false)
        }
    }

    pub fn toggle_pause<H>(&mut self, host: &mut H) -> Result<(), Refusal>
    where
        H: TimeHost + ?Sized,
    {
        let pause = !self.is_paused();
        self.request_pause_change(host, pause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WarpSettings;

    const ENGINE_FIRING: &str = "Cannot time warp while the engine is firing.";

    #[derive(Default)]
    struct MockHost {
        out_of_scene: bool,
        warp_blocked: bool,
        apply_blocked: bool,
        applied: Vec<usize>,
        messages: Vec<String>,
        rebuilds: usize,
        first_warp_seen: Option<usize>,
    }

    impl TimeHost for MockHost {
        fn is_in_simulation_scene(&self) -> bool {
            !self.out_of_scene
        }

        fn can_enter_mode(&self, _index: usize, mode: &TimeMode) -> Result<(), Refusal> {
            if self.warp_blocked && mode.is_warp() {
                Err(Refusal::new(ENGINE_FIRING))
            } else {
                Ok(())
            }
        }

        fn apply_mode(&mut self, index: usize, _mode: &TimeMode) -> Result<(), Refusal> {
            if self.apply_blocked {
                return Err(Refusal::new("Flight is over."));
            }
            self.applied.push(index);
            Ok(())
        }

        fn show_user_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }

        fn table_rebuilt(&mut self, table: &ModeTable) {
            self.rebuilds += 1;
            self.first_warp_seen = Some(table.first_warp_index());
        }
    }

    struct Pressed(Vec<WarpAction>);

    impl InputSource for Pressed {
        fn is_just_pressed(&self, action: WarpAction) -> bool {
            self.0.contains(&action)
        }
    }

    fn setup() -> (ModeController, MockHost, SettingsStore) {
        let store = SettingsStore::new(WarpSettings::default()).unwrap();
        let mut controller = ModeController::new(&store);
        let mut host = MockHost::default();
        assert!(controller.maybe_rebuild(&mut host, &store));
        (controller, host, store)
    }

    #[test]
    fn test_cold_start_rebuilds_on_first_tick() {
        let store = SettingsStore::new(WarpSettings::default()).unwrap();
        let mut controller = ModeController::new(&store);
        let mut host = MockHost::default();
        assert!(controller.is_rebuild_pending(&store));

        controller.tick(&mut host, &Pressed(vec![]), &store);
        assert_eq!(host.rebuilds, 1);
        assert_eq!(host.first_warp_seen, Some(11));
        assert!(!controller.is_rebuild_pending(&store));

        controller.tick(&mut host, &Pressed(vec![]), &store);
        assert_eq!(host.rebuilds, 1);
    }

    #[test]
    fn test_starts_at_normal_speed() {
        let (controller, _, _) = setup();
        assert_eq!(controller.current_index(), 7);
        assert_eq!(controller.unpause_index(), 7);
        assert_eq!(controller.current_mode().multiplier(), 1.0);
        assert_eq!(controller.current_region(), Some(Region::Normal));
    }

    #[test]
    fn test_normal_speed_is_idempotent() {
        let (mut controller, mut host, _) = setup();
        controller.set_mode(&mut host, 3, false).unwrap();

        controller.set_normal_speed_mode(&mut host).unwrap();
        let after_first = controller.current_index();
        controller.set_normal_speed_mode(&mut host).unwrap();
        assert_eq!(after_first, 7);
        assert_eq!(controller.current_index(), after_first);
    }

    #[test]
    fn test_slow_motion_enters_slot_then_keeps_chosen_speed() {
        let (mut controller, mut host, _) = setup();
        controller.set_slow_motion_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 5);

        controller.set_mode(&mut host, 3, false).unwrap();
        host.applied.clear();
        controller.set_slow_motion_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 3);
        assert!(host.applied.is_empty());
    }

    #[test]
    fn test_fast_forward_enters_slot_then_keeps_chosen_speed() {
        let (mut controller, mut host, _) = setup();
        controller.set_fast_forward_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 8);

        controller.set_mode(&mut host, 10, false).unwrap();
        controller.set_fast_forward_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 10);

        // From warp the button drops back to the fast-forward slot.
        controller.set_mode(&mut host, 12, false).unwrap();
        controller.set_fast_forward_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 8);
    }

    #[test]
    fn test_pause_round_trip_from_every_mode() {
        let (mut controller, mut host, _) = setup();
        for index in 1..controller.table().len() {
            controller.set_mode(&mut host, index, false).unwrap();
            controller.request_pause_change(&mut host, true).unwrap();
            assert!(controller.is_paused());
            controller.request_pause_change(&mut host, false).unwrap();
            assert_eq!(controller.current_index(), index);
        }
    }

    #[test]
    fn test_pause_from_slow_motion_and_back() {
        let (mut controller, mut host, _) = setup();
        controller.set_mode(&mut host, 3, false).unwrap();

        controller.request_pause_change(&mut host, true).unwrap();
        assert_eq!(controller.current_index(), PAUSE_INDEX);
        assert_eq!(controller.unpause_index(), 3);

        controller.request_pause_change(&mut host, false).unwrap();
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_pausing_twice_keeps_memory() {
        let (mut controller, mut host, _) = setup();
        controller.set_mode(&mut host, 9, false).unwrap();
        controller.request_pause_change(&mut host, true).unwrap();
        controller.request_pause_change(&mut host, true).unwrap();
        assert_eq!(controller.unpause_index(), 9);
    }

    #[test]
    fn test_pause_memory_recorded_even_when_refused() {
        let (mut controller, mut host, _) = setup();
        controller.set_mode(&mut host, 4, false).unwrap();
        host.apply_blocked = true;

        assert!(controller.request_pause_change(&mut host, true).is_err());
        assert_eq!(controller.current_index(), 4);
        assert_eq!(controller.unpause_index(), 4);
        assert_eq!(host.messages, vec!["Flight is over.".to_string()]);
    }

    #[test]
    fn test_toggle_pause() {
        let (mut controller, mut host, _) = setup();
        controller.set_mode(&mut host, 2, false).unwrap();
        controller.toggle_pause(&mut host).unwrap();
        assert!(controller.is_paused());
        controller.toggle_pause(&mut host).unwrap();
        assert_eq!(controller.current_index(), 2);
    }

    #[test]
    fn test_rebuild_resets_unpause_index() {
        let (mut controller, mut host, mut store) = setup();
        controller.set_mode(&mut host, 3, false).unwrap();
        controller.request_pause_change(&mut host, true).unwrap();

        store.set_default_slow_motion_slot(2);
        assert!(controller.maybe_rebuild(&mut host, &store));
        assert_eq!(controller.unpause_index(), 7);
        assert_eq!(controller.current_index(), PAUSE_INDEX);

        controller.request_pause_change(&mut host, false).unwrap();
        assert_eq!(controller.current_index(), 7);
    }

    #[test]
    fn test_rebuild_only_on_new_revision() {
        let (mut controller, mut host, mut store) = setup();
        assert!(!controller.maybe_rebuild(&mut host, &store));

        store.set_default_fast_forward_slot(9);
        assert!(controller.is_rebuild_pending(&store));
        assert!(controller.maybe_rebuild(&mut host, &store));
        assert!(!controller.maybe_rebuild(&mut host, &store));
        assert_eq!(host.rebuilds, 2);
    }

    #[test]
    fn test_slot_change_applies_after_rebuild() {
        let (mut controller, mut host, mut store) = setup();
        store.set_default_slow_motion_slot(2);

        controller.set_slow_motion_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 5);

        controller.set_normal_speed_mode(&mut host).unwrap();
        controller.maybe_rebuild(&mut host, &store);
        controller.set_slow_motion_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.current_mode().label(), Some("Slow-Mo"));
    }

    #[test]
    fn test_unpause_to_normal_when_pause_does_not_maintain_speed() {
        let (mut controller, mut host, mut store) = setup();
        store.set_pause_maintains_warp_speed(false);
        controller.maybe_rebuild(&mut host, &store);

        controller.set_mode(&mut host, 9, false).unwrap();
        controller.request_pause_change(&mut host, true).unwrap();
        assert_eq!(controller.unpause_index(), 9);
        controller.request_pause_change(&mut host, false).unwrap();
        assert_eq!(controller.current_index(), 7);
    }

    #[test]
    fn test_keybind_priority_order() {
        let (mut controller, mut host, _) = setup();

        let all = Pressed(WarpAction::ALL.to_vec());
        assert_eq!(controller.handle_input(&mut host, &all), Some(WarpAction::SlowMotion));
        assert_eq!(controller.current_index(), 5);

        let three = Pressed(vec![WarpAction::Warp, WarpAction::FastForward, WarpAction::NormalSpeed]);
        assert_eq!(controller.handle_input(&mut host, &three), Some(WarpAction::NormalSpeed));
        assert_eq!(controller.current_index(), 7);

        let two = Pressed(vec![WarpAction::Warp, WarpAction::FastForward]);
        assert_eq!(controller.handle_input(&mut host, &two), Some(WarpAction::FastForward));
        assert_eq!(controller.current_index(), 8);

        let none = Pressed(vec![]);
        assert_eq!(controller.handle_input(&mut host, &none), None);
        assert_eq!(controller.current_index(), 8);
    }

    #[test]
    fn test_warp_refused_reports_once_and_keeps_mode() {
        let (mut controller, mut host, _) = setup();
        host.warp_blocked = true;
        host.applied.clear();

        let warp = Pressed(vec![WarpAction::Warp]);
        assert_eq!(controller.handle_input(&mut host, &warp), Some(WarpAction::Warp));
        assert_eq!(controller.current_index(), 7);
        assert_eq!(host.messages, vec![ENGINE_FIRING.to_string()]);
        assert!(host.applied.is_empty());
    }

    #[test]
    fn test_warp_enters_first_warp_then_noop() {
        let (mut controller, mut host, _) = setup();
        controller.set_warp_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 11);
        assert!(controller.current_mode().is_warp());

        controller.set_mode(&mut host, 13, false).unwrap();
        host.warp_blocked = true;
        controller.set_warp_mode(&mut host).unwrap();
        assert_eq!(controller.current_index(), 13);
        assert!(host.messages.is_empty());
    }

    #[test]
    fn test_tick_outside_scene_does_nothing() {
        let store = SettingsStore::new(WarpSettings::default()).unwrap();
        let mut controller = ModeController::new(&store);
        let mut host = MockHost {
            out_of_scene: true,
            ..MockHost::default()
        };

        let pressed = Pressed(vec![WarpAction::FastForward]);
        assert_eq!(controller.tick(&mut host, &pressed, &store), None);
        assert_eq!(controller.current_index(), 7);
        assert_eq!(host.rebuilds, 0);
        assert!(controller.is_rebuild_pending(&store));
    }

    #[test]
    fn test_tick_rebuilds_before_dispatch() {
        let (mut controller, mut host, mut store) = setup();
        store.set_default_fast_forward_slot(10);

        let pressed = Pressed(vec![WarpAction::FastForward]);
        controller.tick(&mut host, &pressed, &store);
        assert_eq!(controller.current_index(), 10);
    }

    #[test]
    fn test_out_of_range_index_refused() {
        let (mut controller, mut host, _) = setup();
        assert!(controller.set_mode(&mut host, 99, false).is_err());
        assert_eq!(controller.current_index(), 7);
        assert_eq!(host.messages.len(), 1);
    }

    #[test]
    fn test_force_skips_admissibility() {
        let (mut controller, mut host, _) = setup();
        host.warp_blocked = true;
        assert!(controller.set_mode(&mut host, 11, false).is_err());
        controller.set_mode(&mut host, 11, true).unwrap();
        assert_eq!(controller.current_index(), 11);
    }
}
