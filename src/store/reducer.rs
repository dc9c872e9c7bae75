use crate::mvi::Reducer;
use crate::store::intent::RecordsIntent;
use crate::store::state::RecordsState;

pub struct RecordsReducer;

impl Reducer for RecordsReducer {
    type State = RecordsState;
    type Intent = RecordsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RecordsIntent::CommandStarted { mutation } => {
                let in_flight = state.in_flight + 1;
                RecordsState {
                    loading: true,
                    error: None,
                    last_op_succeeded: state.last_op_succeeded && !mutation,
                    in_flight,
                    ..state
                }
            }
            RecordsIntent::CommandFinished => {
                let in_flight = state.in_flight.saturating_sub(1);
                RecordsState {
                    loading: in_flight > 0,
                    in_flight,
                    ..state
                }
            }
            RecordsIntent::ListLoaded(list) => RecordsState { list, ..state },
            RecordsIntent::RecordLoaded(record) => RecordsState {
                selected: Some(record),
                ..state
            },
            RecordsIntent::MutationSucceeded => RecordsState {
                last_op_succeeded: true,
                ..state
            },
            RecordsIntent::CommandFailed { message } => RecordsState {
                error: Some(message),
                ..state
            },
            RecordsIntent::ClearError => RecordsState {
                error: None,
                ..state
            },
            RecordsIntent::ResetSuccess => RecordsState {
                last_op_succeeded: false,
                ..state
            },
            RecordsIntent::ClearSelected => RecordsState {
                selected: None,
                ..state
            },
        }
    }
}
