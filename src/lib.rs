//! Exploratory comparison of bot-labelled election tweet datasets.
//!
//! Three routines, each independent of the others:
//!
//! * [`analysis::comparison`] – follower counts and description lengths of
//!   the US, Georgia and training accounts side by side,
//! * [`analysis::proportions`] – human/bot shares of accounts, tweets,
//!   retweets and replies,
//! * [`analysis::summary`] – unique and verified accounts, tweet volume of
//!   the most active tenth and mean followers.
//!
//! Statistics are computed by [`analysis`] without any rendering; [`app`]
//! and [`ui`] draw them with egui.

pub mod analysis;
pub mod app;
pub mod color;
pub mod command;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod ui;
