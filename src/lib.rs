//! Crate root module declarations for the board lab.
//!
//! Exposes the board model, pseudo-legal move generation, FEN codec, the
//! automated opponents and the game session so the terminal front end,
//! tests and benches share one set of module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod session;
    pub mod square_info;
}

pub mod move_generation {
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_trait;
    pub mod engine_uci;
    pub mod opponent_controller;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod move_log;
    pub mod move_notation;
    pub mod render_board;
}
