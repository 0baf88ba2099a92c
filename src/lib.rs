// Базовые модули
pub mod error;
pub mod config;
pub mod lock;

// Модель и кодек строк CSV
pub mod todo;
pub mod codec;
pub mod table;

// Доступ к файлу данных под блокировкой
pub mod store;

// Удобные реэкспорты
pub use config::{StoreConfig, WriteMode, DEFAULT_DATA_FILE};
pub use error::{Result, TodoError};
pub use lock::{acquire_exclusive_lock, try_acquire_exclusive_lock, LockGuard};
pub use store::FileStore;
pub use table::{CheckOutcome, TodoTable};
pub use todo::Todo;
