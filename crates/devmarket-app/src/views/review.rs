use devmarket_client::ApiClient;
use devmarket_types::api::ReviewCreate;
use uuid::Uuid;

use super::{Navigation, page_err};

/// Write-once review form for a completed order. Submission navigates back
/// to the dashboard; the backend enforces completion and one-per-reviewer.
pub struct ReviewForm {
    pub order_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

impl ReviewForm {
    pub fn new(order_id: Uuid) -> Self {
        Self {
            order_id,
            rating: 5,
            comment: String::new(),
        }
    }

    pub fn mood(&self) -> &'static str {
        match self.rating {
            5 => "Amazing!",
            4 => "Great",
            3 => "Decent",
            2 => "Poor",
            _ => "Terrible",
        }
    }

    pub fn render(&self) -> String {
        let stars = "*".repeat(self.rating as usize);
        format!(
            "== Leave a Review ==\norder: {}\nrating: {stars} ({})\ncomment: {}\n",
            self.order_id,
            self.mood(),
            if self.comment.is_empty() { "(none)" } else { &self.comment }
        )
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Navigation, String> {
        api.create_review(&ReviewCreate {
            order_id: self.order_id,
            rating: self.rating,
            comment: self.comment.clone(),
        })
        .await
        .map_err(page_err)?;
        Ok(Navigation::Dashboard)
    }
}
