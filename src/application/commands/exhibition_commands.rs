// src/application/commands/exhibition_commands.rs
//
// Every command answers with the session as it stands afterwards, so a
// superseded query reports the newer query's exhibition.

use crate::application::dto::SessionDto;
use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;

fn current(state: &AppState) -> SessionDto {
    SessionDto::from_snapshot(&state.session.snapshot(), state.caption_seed)
}

/// Search one account for abandoned repositories
pub async fn explore_account(state: &AppState, account: &str) -> Result<SessionDto, String> {
    state
        .session
        .explore_account(account)
        .await
        .to_error_response()?;
    Ok(current(state))
}

/// Browse a curated collection
pub async fn open_collection(state: &AppState, key: &str) -> Result<SessionDto, String> {
    state.session.open_collection(key).await.to_error_response()?;
    Ok(current(state))
}

/// Change the staleness threshold, re-deriving whatever is on display
pub async fn change_threshold(state: &AppState, months: u32) -> Result<SessionDto, String> {
    state
        .session
        .change_threshold(months)
        .await
        .to_error_response()?;
    Ok(current(state))
}

/// Leave the current account or collection
pub fn close_selection(state: &AppState) -> SessionDto {
    state.session.close_selection();
    current(state)
}

pub fn get_session(state: &AppState) -> SessionDto {
    current(state)
}
