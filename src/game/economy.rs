use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{log, config::Prices};

pub type Money = i64;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ExpenseType {
    #[default]
    Construction,
    Property,
    Other,
}

// ----------------------------------------------
// Economy
// ----------------------------------------------

// Months a recession lasts.
const RECESSION_LENGTH: i32 = 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    // Months until the next recession while positive. Zero or negative means recession.
    pub fluct: i32,
    pub prices: Prices,
}

impl Economy {
    pub fn new(prices: Prices) -> Self {
        Self { fluct: 240, prices }
    }

    #[inline]
    pub fn is_recession(&self) -> bool {
        self.fluct <= 0
    }

    pub fn start_recession(&mut self) {
        self.fluct = -RECESSION_LENGTH;
    }

    pub fn monthly_loop<R>(&mut self, rng: &mut R)
        where R: Rng
    {
        if self.fluct > 0 {
            self.fluct -= 1;
            if self.fluct == 0 {
                self.start_recession();
                log::info!(log::channel!("economy"), "Recession started.");
            }
        } else {
            self.fluct += 1;
            if self.fluct == 0 {
                self.fluct = rng.random_range(168..=423);
                log::info!(log::channel!("economy"), "Recession over, next one in {} months.", self.fluct);
            }
        }
    }
}
