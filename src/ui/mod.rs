pub mod confirm;
pub mod output;
pub mod progress;

pub use confirm::{AutoNo, AutoYes, Confirmer, ConsoleConfirmer, LineConfirmer, ScriptedConfirmer};
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
