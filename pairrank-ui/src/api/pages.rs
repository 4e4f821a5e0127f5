//! Page handlers: server-rendered HTML views

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::html::{escape, hidden, link_item, page};
use crate::AppState;

/// GET /
///
/// Front page: every known item set, plus the form to create a new one.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let sets = state.registry.list_sets().await;

    let mut body = String::from("<h1>Rank what?</h1>\n");
    if !sets.is_empty() {
        body.push_str("<p>Choose a set to rank.</p>\n<ul>\n");
        for (hash, name) in &sets {
            body.push_str(&link_item(&format!("/set/{hash}"), name, ""));
            body.push('\n');
        }
        body.push_str("</ul>\n");
    }
    body.push_str(
        "<form action=\"/sets\" method=\"post\">\n\
         <p>Or enter/paste the items that need ranking (one item per line).</p>\n\
         <div><textarea name=\"items\"></textarea></div>\n\
         <p>Give it a name (e.g.: Episodes of \u{201c}Best Show Evar\u{201d}).</p>\n\
         <div><input name=\"name\"></div>\n\
         <div><button type=\"submit\">Go</button></div>\n\
         </form>",
    );

    Html(page(&body))
}

/// GET /set/:hash
///
/// One item set: its existing rankings and the form to start a new one.
pub async fn set_page(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> AppResult<Html<String>> {
    let set = state.registry.set_snapshot(&hash).await?;

    let mut body = format!("<h1>{}</h1>\n", escape(&set.name));
    if !set.rankings.is_empty() {
        body.push_str("<h2>Existing rankings</h2>\n<ul>\n");
        for summary in &set.rankings {
            body.push_str(&link_item(
                &format!("/ranking/{}", summary.public_token),
                &summary.title,
                if summary.finished { "" } else { " (unfinished)" },
            ));
            body.push('\n');
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<form action=\"/rankings\" method=\"post\">\n");
    body.push_str(&hidden("set", &set.hash));
    body.push_str(
        "\n<h2>Start a new ranking</h2>\n\
         <p>Enter the title for this ranking. Preferably start with your name and \
         specify the ranking criterion. For example: \u{201c}Brian, by preference\u{201d} \
         or \u{201c}Thomas, by difficulty\u{201d}.</p>\n\
         <div><input name=\"title\" value=\"Brian, by preference\"></div>\n\
         <p>Enter the question to ask for comparing each pair of items (examples: \
         \u{201c}Which do you like better?\u{201d} (ranking by preference), \
         \u{201c}Which do you find harder?\u{201d} (ranking by difficulty), etc.)</p>\n\
         <div><input name=\"question\" value=\"Which do you like better?\"></div>\n\
         <div><button type=\"submit\">Go</button></div>\n\
         </form>",
    );

    Ok(Html(page(&body)))
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub secret: Option<String>,
}

/// GET /ranking/:token
///
/// One ranking: the best-known order so far, and, when the correct private
/// token is supplied and a pair is still open, the comparison form. A wrong
/// secret redirects to the public (read-only) view.
pub async fn ranking_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(params): Query<ViewParams>,
) -> AppResult<Response> {
    let (set, ranking) = state.registry.ranking_view(&token).await?;

    let can_edit = match &params.secret {
        Some(secret) if *secret == ranking.private_token => true,
        Some(_) => {
            return Ok(Redirect::to(&format!("/ranking/{}", escape(&token))).into_response());
        }
        None => false,
    };

    let rank_state = ranking.state(set.items.len());

    let mut body = format!(
        "<h1>{}</h1>\n<h2>{}</h2>\n",
        escape(&set.name),
        escape(&ranking.title)
    );

    if can_edit {
        if let Some((ix1, ix2)) = rank_state.next_pair {
            body.push_str(&format!(
                "<form action=\"/rankings/{}/vote\" method=\"post\">\n",
                escape(&token)
            ));
            body.push_str(&hidden("secret", &ranking.private_token));
            body.push_str(&hidden("ix1", &ix1.to_string()));
            body.push_str(&hidden("ix2", &ix2.to_string()));
            body.push_str(&format!(
                "\n<p class=\"comparison\">{}</p>\n",
                escape(&ranking.question)
            ));
            for ix in [ix1, ix2] {
                body.push_str(&format!(
                    "<div class=\"comparison\"><button type=\"submit\" name=\"winner\" \
                     value=\"{ix}\">{}</button></div>\n",
                    escape(&set.items[ix])
                ));
            }
            body.push_str("</form>\n");
        }
    }

    body.push_str("<ul class=\"ranked\">\n");
    for &ix in &rank_state.order {
        let complete = rank_state
            .order
            .iter()
            .all(|&other| other == ix || ranking.comparisons.decided(ix, other));
        body.push_str(&format!(
            "<li class=\"{}\">{}</li>\n",
            if complete { "complete" } else { "incomplete" },
            escape(&set.items[ix])
        ));
    }
    body.push_str("</ul>");

    Ok(Html(page(&body)).into_response())
}
