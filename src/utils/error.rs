use thiserror::Error;

/// 建立名單或抽籤時發生的錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Roster is empty: nobody to draw for")]
    EmptyRoster,

    #[error("Participant name {name:?} appears more than once in the roster")]
    DuplicateName { name: String },

    #[error("Participant name {name:?} is invalid: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Pool {pool} has {size} member(s) but needs at least {min_size} to be assignable: {members:?}")]
    UnassignablePool {
        pool: usize,
        size: usize,
        min_size: usize,
        members: Vec<String>,
    },

    #[error("No eligible recipient left for {giver} in pool {pool}")]
    PoolExhausted { pool: usize, giver: String },
}

/// 驗證抽籤結果時發現的錯誤，每個變體對應一項檢查
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{records} output records and {participants} participants")]
    RecordCountMismatch { records: usize, participants: usize },

    #[error("Output record {giver} is duplicated")]
    DuplicateRecord { giver: String },

    #[error("{recipient} picked {times} times")]
    RecipientOverAssigned { recipient: String, times: usize },

    #[error("{name} has no recorded assignment")]
    MissingRecord { name: String },

    #[error("{giver} was assigned {recipient}, who is not on the roster")]
    UnknownRecipient { giver: String, recipient: String },

    #[error("{recipient} picked by {giver}, who is their partner")]
    PartnerAssigned { giver: String, recipient: String },

    #[error("{giver} picked themselves")]
    SelfAssigned { giver: String },
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Construction error: {0}")]
    Construction(#[from] ConstructionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Configuration,
    Construction,
    Validation,
}

impl ExchangeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExchangeError::IoError(_) => ErrorCategory::Storage,
            ExchangeError::ConfigError { .. }
            | ExchangeError::MissingConfigError { .. }
            | ExchangeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ExchangeError::Construction(_) => ErrorCategory::Construction,
            ExchangeError::Validation(_) => ErrorCategory::Validation,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => format!("Could not read or write the picks: {}", self),
            ErrorCategory::Configuration => format!("The roster configuration is not usable: {}", self),
            ErrorCategory::Construction => format!("The draw could not be completed: {}", self),
            ErrorCategory::Validation => format!("The picks failed validation: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ExchangeError::Construction(ConstructionError::UnassignablePool { .. }) => {
                "Add more participants: a roster with couples needs at least twice the pool minimum"
            }
            ExchangeError::Construction(ConstructionError::PoolExhausted { .. }) => {
                "Run the draw again; a new draw starts from scratch"
            }
            ExchangeError::Construction(_) => "Fix the participant names in the roster",
            ExchangeError::Validation(_) => "Delete the output directory and run the draw again",
            ExchangeError::IoError(_) => "Check that the output path is writable",
            _ => "Check the roster file against the documented layout",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
