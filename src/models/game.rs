use serde::Serialize;

/// Games with a fixed informational payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Scrabble,
    Monopoly,
    Uno,
    Rummy,
}

/// Body of a static payload route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub description: &'static str,
    pub image_url: &'static str,
}

impl Game {
    pub const ALL: [Game; 4] = [Game::Scrabble, Game::Monopoly, Game::Uno, Game::Rummy];

    pub fn path(&self) -> &'static str {
        match self {
            Game::Scrabble => "/scrabble",
            Game::Monopoly => "/monopoly",
            Game::Uno => "/uno",
            Game::Rummy => "/rummy",
        }
    }

    /// Name used in access log lines
    pub fn display_name(&self) -> &'static str {
        match self {
            Game::Scrabble => "Scrabble",
            Game::Monopoly => "Monopoly",
            Game::Uno => "UNO",
            Game::Rummy => "Rummy",
        }
    }

    pub fn info(&self) -> GameInfo {
        match self {
            Game::Scrabble => GameInfo {
                description: "Scrabble is a word game in which two to four players score points by placing tiles, each bearing a single letter, onto a game board divided into a 15×15 grid of squares. The tiles must form words that, in crossword fashion, read left to right in rows or downward in columns and are included in a standard dictionary or lexicon.",
                image_url: "https://upload.wikimedia.org/wikipedia/commons/5/5d/Scrabble_game_in_progress.jpg",
            },
            Game::Monopoly => GameInfo {
                description: "Monopoly is a multiplayer economics-themed board game. In the game, players roll two dice to move around the game board, buying and trading properties and developing them with houses and hotels.",
                image_url: "https://miro.medium.com/v2/resize:fit:1400/0*BaQs4MaCPgxibQdE.jpg",
            },
            Game::Uno => GameInfo {
                description: "Uno (/ˈuːnoʊ/; from Spanish and Italian for 'one'), stylized as UNO, is a proprietary American shedding-type card game originally developed in 1971 by Merle Robbins.",
                image_url: "https://omsapts.com/wp-content/uploads/2022/03/spicy-uno-for-game-night.jpg",
            },
            Game::Rummy => GameInfo {
                description: "fRummy is a tile-based game for 2 to 4 players, combining elements of the card game rummy and mahjong. There are 106 tiles in the game, including 104 numbered tiles (valued 1 to 13 in four different colors, two copies of each) and two jokers.",
                image_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b1/Rummikub_Tiles.jpg/1200px-Rummikub_Tiles.jpg",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_distinct() {
        let paths: HashSet<_> = Game::ALL.iter().map(Game::path).collect();
        assert_eq!(paths.len(), Game::ALL.len());
    }

    #[test]
    fn test_info_serializes_flat() {
        let value = serde_json::to_value(Game::Uno.info()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object["description"].as_str().unwrap().starts_with("Uno"));
        assert!(object["image_url"].as_str().unwrap().starts_with("https://"));
    }
}
