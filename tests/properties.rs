//! Properties that hold for every deal and every sequence of requests.
use std::collections::HashSet;

use proptest::prelude::*;

use freecell::cards::DECK_SIZE;
use freecell::{CardId, Game, Holder, Layout, GAME_NUMBERS};

const SLOT_COUNT: usize = 16;

fn all_cards(game: &Game, layout: &Layout) -> Vec<CardId> {
    layout
        .freecells
        .iter()
        .flatten()
        .copied()
        .chain(layout.foundations.iter().flatten().copied())
        .chain(layout.columns.iter().flatten().copied())
        .chain(game.deck().cards().iter().copied())
        .collect()
}

/// A card index paired with a slot; the extra slot stands for a double click.
fn play(game: &mut Game, card: usize, slot: usize) {
    let Some(card) = CardId::all().nth(card) else {
        return;
    };
    match Holder::roots().nth(slot) {
        Some(target) => {
            game.request_move(card, target);
        }
        None => game.automatic_move(card),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn deals_are_deterministic(game_number in GAME_NUMBERS) {
        let mut a = Game::new();
        let mut b = Game::new();
        a.deal_cards(game_number);
        b.deal_cards(game_number);
        prop_assert_eq!(a.layout(), b.layout());
    }

    #[test]
    fn cards_are_never_lost_or_duplicated(
        game_number in GAME_NUMBERS,
        actions in prop::collection::vec((0usize..DECK_SIZE, 0usize..=SLOT_COUNT), 0..40),
    ) {
        let mut game = Game::new();
        game.deal_cards(game_number);
        for (card, slot) in actions {
            play(&mut game, card, slot);
            let layout = game.layout();
            let cards = all_cards(&game, &layout);
            let unique: HashSet<CardId> = cards.iter().copied().collect();
            prop_assert_eq!(cards.len(), DECK_SIZE);
            prop_assert_eq!(unique.len(), DECK_SIZE);
        }
        game.end_game();
        prop_assert_eq!(game.deck().len(), DECK_SIZE);
    }

    #[test]
    fn undo_then_redo_walks_the_same_states(
        game_number in GAME_NUMBERS,
        actions in prop::collection::vec((0usize..DECK_SIZE, 0usize..=SLOT_COUNT), 0..40),
    ) {
        let mut game = Game::new();
        game.deal_cards(game_number);
        let mut snapshots = vec![(0, game.layout())];
        for (card, slot) in actions {
            play(&mut game, card, slot);
            if game.move_count() != snapshots.last().map_or(0, |(count, _)| *count) {
                snapshots.push((game.move_count(), game.layout()));
            }
        }
        let end = game.move_count();

        while game.can_undo() {
            game.undo();
            if let Some((_, layout)) = snapshots.iter().find(|(count, _)| *count == game.move_count()) {
                prop_assert_eq!(&game.layout(), layout);
            }
        }
        prop_assert_eq!(&game.layout(), &snapshots[0].1);

        while game.can_redo() {
            game.redo();
            if let Some((_, layout)) = snapshots.iter().find(|(count, _)| *count == game.move_count()) {
                prop_assert_eq!(&game.layout(), layout);
            }
        }
        prop_assert_eq!(game.move_count(), end);
    }

    #[test]
    fn sweep_settles(
        game_number in GAME_NUMBERS,
        actions in prop::collection::vec((0usize..DECK_SIZE, 0usize..=SLOT_COUNT), 0..20),
    ) {
        let mut game = Game::new();
        game.deal_cards(game_number);
        for (card, slot) in actions {
            play(&mut game, card, slot);
        }
        game.try_automatic_ace_move(None);

        let settled = game.layout();
        let moves = game.move_count();
        prop_assert!(!game.try_automatic_ace_move(None));
        prop_assert_eq!(game.layout(), settled);
        prop_assert_eq!(game.move_count(), moves);
    }
}
