//! Ordering of the shared game list.

use std::cmp::Ordering;

use crate::core::CatalogItemDetail;
use crate::links::hash_fragment;

/// A star counts this many plain votes
pub const STAR_RATING_WEIGHT: usize = 2;

/// Popularity of a proposed game: weighted stars plus votes
pub fn vote_score(game: &CatalogItemDetail) -> usize {
    game.stars.len() * STAR_RATING_WEIGHT + game.votes.len()
}

/// Most popular first, then higher rating, then higher id.
///
/// Rating and id are compared as text.
pub fn compare_games(a: &CatalogItemDetail, b: &CatalogItemDetail) -> Ordering {
    vote_score(b)
        .cmp(&vote_score(a))
        .then_with(|| b.rating_average.cmp(&a.rating_average))
        .then_with(|| b.id.cmp(&a.id))
}

pub fn sort_game_list(games: &mut [CatalogItemDetail]) {
    games.sort_by(compare_games);
}

/// Number of games the user starred
pub fn star_count(games: &[CatalogItemDetail], uid: &str) -> usize {
    games.iter().filter(|g| g.stars.contains_key(uid)).count()
}

/// Page fragment linking to a game
pub fn item_hash(game: &CatalogItemDetail) -> String {
    hash_fragment(&game.id, &game.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, rating: &str, votes: &[&str], stars: &[&str]) -> CatalogItemDetail {
        CatalogItemDetail {
            id: id.to_string(),
            name: format!("Game {}", id),
            rating_average: rating.to_string(),
            votes: votes.iter().map(|u| (u.to_string(), 1)).collect(),
            stars: stars.iter().map(|u| (u.to_string(), 1)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_vote_score() {
        assert_eq!(vote_score(&game("1", "7.0", &["a", "b"], &["c"])), 4);
        assert_eq!(vote_score(&game("1", "7.0", &[], &[])), 0);
    }

    #[test]
    fn test_sort_game_list() {
        let mut games = vec![
            game("1", "8.0", &["a"], &[]),
            game("2", "6.5", &[], &["a"]),
            game("3", "7.5", &["a"], &[]),
            game("4", "7.5", &["b"], &[]),
        ];

        sort_game_list(&mut games);
        let ids: Vec<&str> = games.iter().map(|g| g.id.as_str()).collect();

        assert_eq!(ids, vec!["2", "1", "4", "3"]);
    }

    #[test]
    fn test_star_count() {
        let games = vec![
            game("1", "8.0", &[], &["a", "b"]),
            game("2", "6.5", &[], &["b"]),
            game("3", "7.5", &["a"], &[]),
        ];
        assert_eq!(star_count(&games, "a"), 1);
        assert_eq!(star_count(&games, "b"), 2);
        assert_eq!(star_count(&games, "z"), 0);
    }

    #[test]
    fn test_item_hash() {
        assert_eq!(item_hash(&game("13", "7.1", &[], &[])), "#13:Game_13");
    }
}
