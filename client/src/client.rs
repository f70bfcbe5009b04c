use std::sync::Arc;

use msweeper_common::{
    models::{GameResult, HistoryResult, Mark},
    protocol::{MarkRequest, NewGameRequest, SpotRequest},
};
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::{ClientConfig, FallbackMessage};
use crate::error::{ClientError, ErrorCause, ErrorResult};
use crate::response::ResponseNormalizer;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::ApiResult;

const ROOT: [&str; 2] = ["minesweeper", "game"];

fn game_path(game_id: &str, action: &str) -> Vec<String> {
    let mut segments: Vec<String> = ROOT.iter().map(|s| s.to_string()).collect();
    segments.push(game_id.to_string());
    segments.push(action.to_string());
    segments
}

fn encode<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| {
        ErrorResult::new(
            ErrorCause::UnexpectedServerError,
            format!("Failed to encode request body: {}", e),
        )
    })
}

/// HTTP client for the msweeper game service.
///
/// Every operation resolves to either the game state or an [`ErrorResult`];
/// transport failures and error statuses never escape as anything else. The
/// client holds no mutable state and can be shared between tasks.
#[derive(Clone)]
pub struct MSweeperClient {
    transport: Arc<dyn Transport>,
    normalizer: ResponseNormalizer,
}

impl MSweeperClient {
    /// Create a new client connecting to the specified server URL
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config)?;
        info!("Created msweeper client for {}", transport.base_url());

        Ok(Self {
            transport: Arc::new(transport),
            normalizer: ResponseNormalizer::new(config.fallback_message),
        })
    }

    /// Create a client on top of a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            normalizer: ResponseNormalizer::default(),
        }
    }

    pub fn fallback_message(mut self, fallback: FallbackMessage) -> Self {
        self.normalizer = ResponseNormalizer::new(fallback);
        self
    }

    /// The transport every request of this client goes through
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        debug!("{} {}", request.method, request.path());
        let outcome = self.transport.send(request).await;
        self.normalizer.normalize(outcome)
    }

    /// Create a new game. Omitted dimensions default to a 9x9 board with 15 mines.
    #[instrument(level = "debug", skip(self))]
    pub async fn new_game(
        &self,
        user: &str,
        rows: Option<i64>,
        columns: Option<i64>,
        mines: Option<i64>,
    ) -> ApiResult<GameResult> {
        let defaults = NewGameRequest::new(user);
        self.create_game(NewGameRequest {
            rows: rows.unwrap_or(defaults.rows),
            columns: columns.unwrap_or(defaults.columns),
            mines: mines.unwrap_or(defaults.mines),
            ..defaults
        })
        .await
    }

    #[instrument(level = "debug", skip(self, params), fields(user = %params.user, rows = params.rows, columns = params.columns, mines = params.mines))]
    pub async fn create_game(&self, params: NewGameRequest) -> ApiResult<GameResult> {
        let request = HttpRequest::new(Method::POST, ROOT).body(encode(&params)?);
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_game(&self, game_id: &str) -> ApiResult<GameResult> {
        let request = HttpRequest::new(Method::GET, ROOT).query("gameId", game_id);
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_game_history(&self, game_id: &str) -> ApiResult<HistoryResult> {
        let request = HttpRequest::new(Method::GET, game_path(game_id, "history"));
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn reveal_spot(&self, game_id: &str, row: i64, col: i64) -> ApiResult<GameResult> {
        let body = encode(&SpotRequest { row, col })?;
        let request = HttpRequest::new(Method::PUT, game_path(game_id, "reveal")).body(body);
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn mark_spot_with_question(
        &self,
        game_id: &str,
        row: i64,
        col: i64,
    ) -> ApiResult<GameResult> {
        self.send_mark_to_spot(game_id, row, col, Mark::QuestionMark.as_str())
            .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn mark_spot_with_flag(&self, game_id: &str, row: i64, col: i64) -> ApiResult<GameResult> {
        self.send_mark_to_spot(game_id, row, col, Mark::FlagMark.as_str())
            .await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove_mark(&self, game_id: &str, row: i64, col: i64) -> ApiResult<GameResult> {
        self.send_mark_to_spot(game_id, row, col, Mark::None.as_str())
            .await
    }

    /// Low-level mark request with an arbitrary tag.
    ///
    /// The tag is sent as-is; only the server decides whether it names a real
    /// mark, and an illegal one comes back as an `Invalid Parameters` error.
    /// Prefer the three typed mark operations.
    #[instrument(level = "debug", skip(self))]
    pub async fn send_mark_to_spot(
        &self,
        game_id: &str,
        row: i64,
        col: i64,
        mark: &str,
    ) -> ApiResult<GameResult> {
        let body = encode(&MarkRequest {
            row,
            col,
            mark: mark.to_string(),
        })?;
        let request = HttpRequest::new(Method::PUT, game_path(game_id, "mark")).body(body);
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn pause_game(&self, game_id: &str) -> ApiResult<GameResult> {
        let request = HttpRequest::new(Method::PATCH, game_path(game_id, "pause"));
        self.execute(request).await
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn resume_game(&self, game_id: &str) -> ApiResult<GameResult> {
        let request = HttpRequest::new(Method::PATCH, game_path(game_id, "resume"));
        self.execute(request).await
    }
}
