use crate::ui::mvi::Reducer;

use super::intent::ScreenIntent;
use super::state::ScreenState;

pub struct ScreenReducer;

impl Reducer for ScreenReducer {
    type State = ScreenState;
    type Intent = ScreenIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScreenIntent::Activate(screen) => ScreenState { active: screen },
        }
    }
}
