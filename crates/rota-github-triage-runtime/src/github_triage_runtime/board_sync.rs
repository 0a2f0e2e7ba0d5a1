//! Idempotent add-or-find protocol against the project board.
//!
//! The board offers no atomic upsert, so registration is a two-step
//! create-else-find sequence. Duplicate invocations (e.g. `opened` and
//! `labeled` firing in quick succession) converge on the same item id
//! without erroring and without duplicate board entries.

use tracing::{info, warn};

use super::board_api_client::BoardApiClient;

/// Ensures the content is represented on the board and returns its item id.
///
/// Fast path: the creating mutation answers with a fresh item id. When it
/// fails or answers without an id, fall back to one bounded membership
/// lookup page and select the entry belonging to `board_id`.
pub(super) async fn ensure_board_item(
    client: &BoardApiClient,
    board_id: &str,
    content_ref: &str,
    page_size: u32,
) -> Option<String> {
    match client.add_item(board_id, content_ref).await {
        Ok(Some(item_id)) => {
            info!(item_id = %item_id, "registered content on board");
            return Some(item_id);
        }
        Ok(None) => {
            info!("board item creation returned no id, falling back to membership lookup");
        }
        Err(error) => {
            info!(error = %error, "board item creation failed, falling back to membership lookup");
        }
    }

    match client.find_item(board_id, content_ref, page_size).await {
        Ok(Some(item_id)) => {
            info!(item_id = %item_id, "resolved existing board item");
            Some(item_id)
        }
        Ok(None) => {
            warn!("content has no item on the target board");
            None
        }
        Err(error) => {
            warn!(error = %error, "board membership lookup failed");
            None
        }
    }
}

/// Sets a single-select field option on a board item.
///
/// Silently skips when the item, field, or option id is unresolved; a
/// failed update is logged and swallowed, never retried.
pub(super) async fn set_single_select_field(
    client: &BoardApiClient,
    board_id: &str,
    item_id: Option<&str>,
    field_id: Option<&str>,
    option_id: Option<&str>,
) {
    let (Some(item_id), Some(field_id), Some(option_id)) = (item_id, field_id, option_id) else {
        info!("single-select update skipped, item/field/option id unresolved");
        return;
    };
    if let Err(error) = client
        .update_single_select_field(board_id, item_id, field_id, option_id)
        .await
    {
        warn!(error = %error, "single-select field update failed");
    }
}
