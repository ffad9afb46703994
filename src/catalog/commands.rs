//! Demo command table
//!
//! Ids 47 and 99 are advertised so hosts can render them, but this device
//! has no behavior behind them.

use crate::core::logging::LogMask;
use reach_core::catalog::{CommandAction, CommandDescriptor};

pub const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        id: 1,
        name: "Enable remote CLI",
        action: CommandAction::EnableRemoteCli,
    },
    CommandDescriptor {
        id: 2,
        name: "Disable remote CLI",
        action: CommandAction::DisableRemoteCli,
    },
    CommandDescriptor {
        id: 3,
        name: "Minimize Logging (lm 0)",
        action: CommandAction::SetLogMask(0),
    },
    CommandDescriptor {
        id: 4,
        name: "Much Logging (lm 7C0)",
        action: CommandAction::SetLogMask(LogMask::VERBOSE.bits()),
    },
    CommandDescriptor {
        id: 10,
        name: "Factory Reset",
        action: CommandAction::FactoryReset,
    },
    CommandDescriptor {
        id: 47,
        name: "Trigger OTA",
        action: CommandAction::NotImplemented,
    },
    CommandDescriptor {
        id: 99,
        name: "Board Reset",
        action: CommandAction::NotImplemented,
    },
];
