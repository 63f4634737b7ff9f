use crate::slide::SlideKey;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Next,
    Previous,
    JumpTo(isize),
    Select(SlideKey),
    SetCompact(bool),
    ToggleCompact,
    SetGap(f64),
    Show,
    ConfigReload,
    Quit,
}
