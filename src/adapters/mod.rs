//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `hardware` | SensorPort   | temperature source              |
//! |            | ActuatorPort | light + fan drivers             |
//! | `log_sink` | EventSink    | `log` facade                    |
//! | `console`  | EventSink    | terminal (also reads the menu)  |

pub mod console;
pub mod hardware;
pub mod log_sink;
