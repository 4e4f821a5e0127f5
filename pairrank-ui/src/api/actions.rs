//! Form-post handlers: create set, start ranking, vote

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

use pairrank_common::model::parse_items;
use pairrank_common::Error;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSetForm {
    pub name: String,
    pub items: String,
}

/// POST /sets
///
/// Create an item set from pasted lines; identical item lists collapse to
/// the same set. Redirects to the set page either way.
pub async fn create_set(
    State(state): State<AppState>,
    Form(form): Form<CreateSetForm>,
) -> AppResult<Redirect> {
    let items = parse_items(&form.items);
    let (hash, _created) = state.registry.create_set(&form.name, items).await?;
    Ok(Redirect::to(&format!("/set/{hash}")))
}

#[derive(Debug, Deserialize)]
pub struct StartRankingForm {
    pub set: String,
    pub title: String,
    pub question: String,
}

/// POST /rankings
///
/// Start a ranking against an existing set and redirect to its editable
/// view (public token in the path, private token in the query).
pub async fn start_ranking(
    State(state): State<AppState>,
    Form(form): Form<StartRankingForm>,
) -> AppResult<Redirect> {
    let ranking = state
        .registry
        .start_ranking(&form.set, &form.title, &form.question)
        .await?;
    Ok(Redirect::to(&format!(
        "/ranking/{}?secret={}",
        ranking.public_token, ranking.private_token
    )))
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub secret: String,
    pub ix1: String,
    pub ix2: String,
    pub winner: String,
}

/// POST /rankings/:token/vote
///
/// Submit one answered comparison. The pair must be the currently offered
/// question and the secret must match; anything else is rejected before any
/// state changes.
pub async fn vote(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(form): Form<VoteForm>,
) -> AppResult<Redirect> {
    let ix1 = parse_index("ix1", &form.ix1)?;
    let ix2 = parse_index("ix2", &form.ix2)?;
    let winner = parse_index("winner", &form.winner)?;

    state
        .registry
        .submit(&token, &form.secret, ix1, ix2, winner)
        .await?;

    Ok(Redirect::to(&format!(
        "/ranking/{token}?secret={}",
        form.secret
    )))
}

fn parse_index(field: &str, value: &str) -> Result<usize, Error> {
    value
        .parse::<usize>()
        .map_err(|_| Error::StaleOrInvalidPair(format!("{field} is not a valid index: {value:?}")))
}
