pub mod dataset;
pub mod evaluation;
pub mod events;
pub mod export;
pub mod injuries;
pub mod narrative;
pub mod nlp;
pub mod players;
pub mod process;
pub mod record;
pub mod stats;
pub mod summarize;
pub mod template;
