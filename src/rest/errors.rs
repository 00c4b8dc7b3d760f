use std::fmt;
use std::fmt::Formatter;

use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::blockfrost::BlockfrostError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String, Option<String>),
    Upstream(&'static str, Option<String>),
    NotFound,
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::convert::From<ApiError> for HttpResponse {
    fn from(error: ApiError) -> Self {
        ApiErrorData::from(error).into()
    }
}

impl std::convert::From<ApiError> for ApiErrorData {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::NotFound => ApiErrorData {
                code: codes::ResultCode::NotFound,
                message: codes::NOT_FOUND.to_string(),
                reason: Some("resource not found".to_string()),
            },
            ApiError::Validation(msg, ctx) => ApiErrorData {
                code: codes::ResultCode::BadRequest,
                message: msg.to_string(),
                reason: ctx,
            },
            ApiError::Upstream(msg, ctx) => ApiErrorData {
                code: codes::ResultCode::BadGateway,
                message: msg.to_string(),
                reason: ctx,
            },
        }
    }
}

/// Upstream failures reach clients as a generic message; details stay in
/// the logs.
impl std::convert::From<BlockfrostError> for ApiErrorData {
    fn from(error: BlockfrostError) -> Self {
        let reason = match error {
            BlockfrostError::Status { status, .. } => Some(format!("upstream status {}", status)),
            BlockfrostError::Transport { .. } => Some("upstream unreachable".to_string()),
            BlockfrostError::Decode { .. } => Some("unexpected upstream payload".to_string()),
        };
        ApiError::Upstream(codes::WALLET_UNAVAILABLE, reason).into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ApiErrorData {
    pub code: codes::ResultCode,
    pub message: String,
    pub reason: Option<String>,
}

impl std::fmt::Display for ApiErrorData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}: {}; {:?})", self.code, self.message, self.reason)
    }
}

impl std::error::Error for ApiErrorData {}

impl ResponseError for ApiErrorData {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::from(self.clone())
    }
}

pub fn bad_request(msg: &str, reason: Option<String>) -> HttpResponse {
    ApiError::Validation(msg.to_string(), reason).into()
}

impl std::convert::From<ApiErrorData> for HttpResponse {
    fn from(error: ApiErrorData) -> Self {
        #[derive(Serialize)]
        struct Response {
            pub error: ApiErrorData,
        }

        let mut resp = HttpResponse::build(error.code.clone().into());
        resp.json(&Response { error })
    }
}

pub mod codes {
    use actix_web::http::StatusCode;
    use serde::{Serialize, Serializer};

    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const WALLET_UNAVAILABLE: &str = "Failed to fetch wallet info";

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum ResultCode {
        Ok,          // - success
        BadRequest,  // - something is wrong with the data that was sent
        NotFound,    // - standard - no route
        ServerError, // - error on the server that the client cannot fix
        BadGateway,  // - blockfrost failed or is unreachable
        Other(u16),
    }

    impl std::fmt::Display for ResultCode {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let status_code: StatusCode = self.into();
            write!(f, "{}", status_code)
        }
    }

    impl Default for ResultCode {
        fn default() -> Self {
            ResultCode::Other(0)
        }
    }

    impl std::convert::From<u16> for ResultCode {
        fn from(code: u16) -> Self {
            match code {
                200 => ResultCode::Ok,
                400 => ResultCode::BadRequest,
                404 => ResultCode::NotFound,
                500 => ResultCode::ServerError,
                502 => ResultCode::BadGateway,
                _ => ResultCode::Other(code),
            }
        }
    }

    impl std::convert::From<ResultCode> for StatusCode {
        fn from(code: ResultCode) -> StatusCode {
            StatusCode::from_u16(code.into()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }

    impl std::convert::From<&ResultCode> for StatusCode {
        fn from(code: &ResultCode) -> StatusCode {
            StatusCode::from_u16(code.into()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }

    impl std::convert::From<ResultCode> for u16 {
        fn from(code: ResultCode) -> u16 {
            u16::from(&code)
        }
    }

    impl std::convert::From<&ResultCode> for u16 {
        fn from(code: &ResultCode) -> u16 {
            match code {
                ResultCode::Ok => 200,
                ResultCode::BadRequest => 400,
                ResultCode::NotFound => 404,
                ResultCode::ServerError => 500,
                ResultCode::BadGateway => 502,
                ResultCode::Other(code) => *code,
            }
        }
    }

    impl Serialize for ResultCode {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u16(self.into())
        }
    }
}
