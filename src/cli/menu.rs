//! Console menus
//!
//! Each menu validates choices against its own option codes, so `4` is a
//! valid dashboard choice but not a valid main menu choice.

/// A numbered menu option
pub trait MenuOption: Copy + Sized + 'static {
    /// All options in display order
    const ALL: &'static [Self];

    /// The number the user types
    fn code(self) -> u32;

    fn label(self) -> &'static str;

    fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.code() == code)
    }

    fn is_valid_code(code: &u32) -> bool {
        Self::from_code(*code).is_some()
    }

    /// Menu lines, e.g. "1. Signup"
    fn render() -> String {
        Self::ALL
            .iter()
            .map(|option| format!("{}. {}", option.code(), option.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Top-level menu shown before login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    Signup,
    Login,
    Exit,
}

impl MenuOption for MainMenuOption {
    const ALL: &'static [Self] = &[Self::Signup, Self::Login, Self::Exit];

    fn code(self) -> u32 {
        match self {
            Self::Signup => 1,
            Self::Login => 2,
            Self::Exit => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Signup => "Signup",
            Self::Login => "Login",
            Self::Exit => "Exit",
        }
    }
}

/// Per-account menu shown after login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardOption {
    Deposit,
    Withdraw,
    Transaction,
    Logout,
}

impl MenuOption for DashboardOption {
    const ALL: &'static [Self] = &[
        Self::Deposit,
        Self::Withdraw,
        Self::Transaction,
        Self::Logout,
    ];

    fn code(self) -> u32 {
        match self {
            Self::Deposit => 1,
            Self::Withdraw => 2,
            Self::Transaction => 3,
            Self::Logout => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Transaction => "Transaction",
            Self::Logout => "Logout",
        }
    }
}
