//! End-to-end play through the public surface.
use freecell::cards::ACE;
use freecell::holder::COLUMNS;
use freecell::{Change, Game, Holder};

#[test]
fn deal_move_undo_redo() {
    let mut game = Game::new();
    game.deal_cards(1_000_000);
    assert_eq!(game.column(0).len(), 7);
    assert_eq!(game.column(COLUMNS - 1).len(), 6);
    let dealt = game.layout();

    let exposed = *game.column(0).last().unwrap();
    // An ace never parks in a freecell; it goes home instead.
    let target = if exposed.card().rank == ACE {
        Holder::Foundation(exposed.card().suit)
    } else {
        Holder::FreeCell(0)
    };
    assert!(game.request_move(exposed, target));
    assert_eq!(game.root_of(exposed), Some(target));
    let moved = game.layout();
    // The move may have exposed cards the sweep sent home; those are recorded too.
    let moves = game.move_count();
    assert!(moves >= 1);

    for _ in 0..moves {
        game.undo();
    }
    assert_eq!(game.layout(), dealt);
    assert!(!game.can_undo());

    for _ in 0..moves {
        game.redo();
    }
    assert_eq!(game.layout(), moved);
    assert!(!game.can_redo());
}

#[test]
fn deal_announces_itself() {
    let mut game = Game::new();
    game.deal_cards(7_654_321);
    let changes = game.drain_changes();
    assert!(changes.contains(&Change::GameNumber(7_654_321)));
    assert_eq!(
        changes.iter().filter(|change| matches!(change, Change::Shown(_))).count(),
        52
    );
    assert!(game.drain_changes().is_empty());
}
