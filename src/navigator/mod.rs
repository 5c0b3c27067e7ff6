//! Scene-driven recovery procedures built on the solver's retry loop.

pub mod home;
pub mod login;

pub use home::{back_to_index, HomeProcedure};
pub use login::{login, LoginProcedure};

use crate::errors::MowerResult;
use crate::solver::engine::Solver;

impl Solver {
    /// See [`login()`].
    pub async fn login(&mut self) -> MowerResult<()> {
        login::login(self).await
    }

    /// See [`back_to_index()`].
    pub async fn back_to_index(&mut self) -> MowerResult<()> {
        home::back_to_index(self).await
    }
}
