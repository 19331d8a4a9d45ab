/// Messaging module for the Command/Event architecture
///
/// - **Commands**: requests coming from the UI (imperative, targeted)
/// - **Events**: notifications of changes the board made (past tense, broadcast)
///
/// ## Architecture
///
/// ```text
/// ┌─────────┐     Command      ┌──────────┐  mutate/save  ┌────────────┐
/// │  Input  │ ───────────────> │ Executor │ ────────────> │ Scoreboard │
/// │ (host)  │                  │          │               │            │
/// └─────────┘                  └──────────┘               └────────────┘
///                                                               │
///                                               ViewPatch       │      Event
///                                             ┌─────────────────┴──────────┐
///                                             ▼                            ▼
///                                        ┌────────┐                 ┌───────────┐
///                                        │  View  │                 │ Event Bus │
///                                        └────────┘                 └───────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let bus = EventBus::new();
/// let (rx, _id) = bus.subscribe();
///
/// let board = Scoreboard::open(store, view, BoardSettings::default(), bus);
/// let mut executor = CommandExecutor::new(board, export_dir);
///
/// executor.execute_sync(Command::AdjustScore { id: 1, delta: 1 });
///
/// while let Ok(event) = rx.try_recv() {
///     println!("{}", event.description());
/// }
/// ```

pub mod bus;
pub mod commands;
pub mod events;
pub mod executor;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::{Command, CommandResult, Confirmed};
pub use events::Event;
pub use executor::CommandExecutor;
