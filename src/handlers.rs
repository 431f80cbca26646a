use crate::counter::Outcome;
use crate::errors::AppError;
use crate::models::{ClickRequest, ClickResponse, EditForm, ProjectState, TokenForm};
use crate::mutator::Delta;
use crate::prompt::PresetPrompt;
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::View;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut view = View::full();
    let loaded = state.counter.load(&mut view).await.is_some();
    let has_token = state.counter.has_token().await;
    Html(render_index(&view, loaded, has_token))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<ProjectState>, AppError> {
    state
        .counter
        .load(&mut View::default())
        .await
        .map(Json)
        .ok_or_else(|| AppError::bad_gateway("failed to load data.json"))
}

pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, AppError> {
    let action = payload.action.trim();
    let outcome = match action {
        "plus" => apply_delta(&state, Delta::Plus).await?,
        "minus" => apply_delta(&state, Delta::Minus).await?,
        "reset" => {
            let mut view = View::counter_only();
            state
                .counter
                .reset_count(&PresetPrompt::default(), &mut view)
                .await?
        }
        _ => return Err(AppError::bad_request("action must be 'plus', 'minus' or 'reset'")),
    };

    Ok(Json(to_response(&outcome)))
}

pub async fn plus(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_delta(&state, Delta::Plus).await?;
    Ok(Redirect::to("/"))
}

pub async fn minus(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_delta(&state, Delta::Minus).await?;
    Ok(Redirect::to("/"))
}

pub async fn reset(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut view = View::counter_only();
    state
        .counter
        .reset_count(&PresetPrompt::default(), &mut view)
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_name(
    State(state): State<AppState>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let mut view = View::default();
    state
        .counter
        .edit_project_name(&PresetPrompt::with_value(form.value), &mut view)
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_link(
    State(state): State<AppState>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let mut view = View::default();
    state
        .counter
        .edit_project_link(&PresetPrompt::with_value(form.value), &mut view)
        .await?;
    Ok(Redirect::to("/"))
}

pub async fn set_token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Redirect, AppError> {
    state.counter.login(&form.token).await?;
    Ok(Redirect::to("/"))
}

async fn apply_delta(state: &AppState, delta: Delta) -> Result<Outcome, AppError> {
    let mut view = View::counter_only();
    state
        .counter
        .update_count(delta, &PresetPrompt::default(), &mut view)
        .await
}

fn to_response(outcome: &Outcome) -> ClickResponse {
    ClickResponse {
        outcome: outcome.label().to_string(),
        count: match outcome {
            Outcome::Saved(state) => Some(state.count),
            Outcome::Unchanged | Outcome::Skipped => None,
        },
    }
}
