//! Expand/collapse state machine for the solar badge.
//!
//! All state lives in one [`Expansion`] value and every mutation goes
//! through [`Expansion::on`]. A transition yields the next state plus an
//! ordered list of [`Effect`]s; the controller applies them in exactly that
//! order, so ordering guarantees (clear the CSS scale before reparenting,
//! fade the backdrop before the canvas moves home) are encoded here once.

/// Where the badge is in its expand/collapse lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Inline decorative badge.
    #[default]
    Idle,
    /// Pointer entered the badge; CSS scale grows the canvas in place
    /// while the hover scalar eases toward 1.
    PreExpand,
    /// Canvas lives in the fullscreen overlay. `entered_core` latches once
    /// the pointer has been inside the hit radius.
    Expanded { entered_core: bool },
}

/// Inputs that may move the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Pointer entered the inline badge's hit area.
    BadgeEnter,
    /// Pointer left the inline badge. Never collapses.
    BadgeLeave,
    /// Smoothed hover scalar sampled by the frame loop.
    HoverProgress(f32),
    /// Document-wide pointer position relative to the sun's hit radius.
    CorePointer { inside: bool },
}

/// Side effects of a transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hover target → 1.
    RaiseHoverTarget,
    /// Hover target → 0.
    DropHoverTarget,
    /// Pointer target → centre.
    ResetPointer,
    /// Apply the pre-expand CSS scale to the inline canvas.
    ScaleCanvas,
    /// Remove the CSS scale from the canvas.
    ClearCanvasScale,
    /// Create the background layer if absent and fade it in.
    ShowBackdrop,
    /// Start the background layer's fade-out.
    FadeBackdrop,
    /// Remove the background layer once its fade-out has elapsed.
    ScheduleBackdropRemoval,
    /// Record the sun's viewport-normalised centre.
    CaptureAnchor,
    /// Create the fullscreen overlay and move the canvas into it.
    MountOverlay,
    /// Move the canvas back inline, restore its sizing, drop the overlay.
    UnmountOverlay,
    /// Lift the hero content above the overlay.
    RaiseHero,
    /// Restore the hero section's stacking and visibility.
    RestoreHero,
    /// Register the scroll and document pointer-move trackers.
    AttachTrackers,
    /// Unregister the scroll and document pointer-move trackers.
    DetachTrackers,
    /// Opaque clear colour for the fullscreen view.
    OpaqueClear,
    /// Transparent clear colour for the inline badge.
    TransparentClear,
    /// Recompute output size and projection.
    Resize,
}

/// Result of an accepted trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: Expansion,
    pub effects: &'static [Effect],
}

const BEGIN_PRE_EXPAND: &[Effect] = &[
    Effect::RaiseHoverTarget,
    Effect::ScaleCanvas,
    Effect::ShowBackdrop,
];

// ClearCanvasScale must precede MountOverlay or the canvas visibly jumps.
const ENTER_EXPANDED: &[Effect] = &[
    Effect::ClearCanvasScale,
    Effect::CaptureAnchor,
    Effect::MountOverlay,
    Effect::RaiseHero,
    Effect::AttachTrackers,
    Effect::OpaqueClear,
    Effect::Resize,
];

const COLLAPSE: &[Effect] = &[
    Effect::DropHoverTarget,
    Effect::ResetPointer,
    Effect::FadeBackdrop,
    Effect::UnmountOverlay,
    Effect::DetachTrackers,
    Effect::RestoreHero,
    Effect::TransparentClear,
    Effect::Resize,
    Effect::ScheduleBackdropRemoval,
];

impl Expansion {
    /// Evaluate a trigger. `None` means the trigger is ignored in this state.
    pub fn on(self, trigger: Trigger, threshold: f32) -> Option<Step> {
        match (self, trigger) {
            (Expansion::Idle, Trigger::BadgeEnter) => Some(Step {
                next: Expansion::PreExpand,
                effects: BEGIN_PRE_EXPAND,
            }),
            (Expansion::PreExpand, Trigger::HoverProgress(hover)) if hover > threshold => {
                Some(Step {
                    next: Expansion::Expanded { entered_core: false },
                    effects: ENTER_EXPANDED,
                })
            }
            (Expansion::Expanded { entered_core: false }, Trigger::CorePointer { inside: true }) => {
                Some(Step {
                    next: Expansion::Expanded { entered_core: true },
                    effects: &[],
                })
            }
            (Expansion::Expanded { entered_core: true }, Trigger::CorePointer { inside: false }) => {
                Some(Step {
                    next: Expansion::Idle,
                    effects: COLLAPSE,
                })
            }
            _ => None,
        }
    }

    pub fn is_expanded(self) -> bool {
        matches!(self, Expansion::Expanded { .. })
    }

    pub fn name(self) -> &'static str {
        match self {
            Expansion::Idle => "Idle",
            Expansion::PreExpand => "PreExpand",
            Expansion::Expanded { .. } => "Expanded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 0.6;

    fn position(effects: &[Effect], effect: Effect) -> usize {
        effects
            .iter()
            .position(|e| *e == effect)
            .unwrap_or_else(|| panic!("{effect:?} missing from {effects:?}"))
    }

    #[test]
    fn enter_starts_pre_expand() {
        let step = Expansion::Idle.on(Trigger::BadgeEnter, T).unwrap();
        assert_eq!(step.next, Expansion::PreExpand);
        assert_eq!(step.effects[0], Effect::RaiseHoverTarget);
        assert!(step.effects.contains(&Effect::ShowBackdrop));
    }

    #[test]
    fn re_enter_is_guarded() {
        assert!(Expansion::PreExpand.on(Trigger::BadgeEnter, T).is_none());
        assert!(Expansion::Expanded { entered_core: false }.on(Trigger::BadgeEnter, T).is_none());
        assert!(Expansion::Expanded { entered_core: true }.on(Trigger::BadgeEnter, T).is_none());
    }

    #[test]
    fn leave_never_transitions() {
        for state in [
            Expansion::Idle,
            Expansion::PreExpand,
            Expansion::Expanded { entered_core: false },
            Expansion::Expanded { entered_core: true },
        ] {
            assert!(state.on(Trigger::BadgeLeave, T).is_none(), "{state:?}");
        }
    }

    #[test]
    fn threshold_must_be_crossed() {
        assert!(Expansion::PreExpand.on(Trigger::HoverProgress(0.59), T).is_none());
        assert!(Expansion::PreExpand.on(Trigger::HoverProgress(0.6), T).is_none());
        let step = Expansion::PreExpand.on(Trigger::HoverProgress(0.61), T).unwrap();
        assert_eq!(step.next, Expansion::Expanded { entered_core: false });
    }

    #[test]
    fn hover_progress_ignored_outside_pre_expand() {
        assert!(Expansion::Idle.on(Trigger::HoverProgress(0.9), T).is_none());
        assert!(Expansion::Expanded { entered_core: true }
            .on(Trigger::HoverProgress(0.9), T)
            .is_none());
    }

    #[test]
    fn css_scale_cleared_before_reparent() {
        let step = Expansion::PreExpand.on(Trigger::HoverProgress(0.7), T).unwrap();
        assert!(
            position(step.effects, Effect::ClearCanvasScale)
                < position(step.effects, Effect::MountOverlay)
        );
        assert!(
            position(step.effects, Effect::CaptureAnchor)
                < position(step.effects, Effect::MountOverlay)
        );
    }

    #[test]
    fn collapse_requires_prior_core_entry() {
        let fresh = Expansion::Expanded { entered_core: false };
        assert!(fresh.on(Trigger::CorePointer { inside: false }, T).is_none());

        let latched = fresh.on(Trigger::CorePointer { inside: true }, T).unwrap();
        assert_eq!(latched.next, Expansion::Expanded { entered_core: true });
        assert!(latched.effects.is_empty());

        let step = latched.next.on(Trigger::CorePointer { inside: false }, T).unwrap();
        assert_eq!(step.next, Expansion::Idle);
    }

    #[test]
    fn collapse_effect_order() {
        let step = Expansion::Expanded { entered_core: true }
            .on(Trigger::CorePointer { inside: false }, T)
            .unwrap();
        let fx = step.effects;
        assert_eq!(fx[0], Effect::DropHoverTarget);
        assert!(position(fx, Effect::FadeBackdrop) < position(fx, Effect::UnmountOverlay));
        assert!(position(fx, Effect::UnmountOverlay) < position(fx, Effect::DetachTrackers));
        assert!(position(fx, Effect::RestoreHero) < position(fx, Effect::TransparentClear));
        assert!(position(fx, Effect::TransparentClear) < position(fx, Effect::Resize));
        assert_eq!(fx[fx.len() - 1], Effect::ScheduleBackdropRemoval);
    }

    #[test]
    fn staying_inside_is_a_no_op() {
        let s = Expansion::Expanded { entered_core: true };
        assert!(s.on(Trigger::CorePointer { inside: true }, T).is_none());
    }
}
