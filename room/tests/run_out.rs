//! All-in run-outs and pot capping, exercised at the reducer level so the
//! board and payouts can be inspected street by street.

use holdem_room::poker::evaluate_best_hand;
use holdem_room::table::{close_round, deal_cards, process_move, transition_phase};
use holdem_shared::{
    Move, PlayerState, PlayerStatus, PokerState, Street, TableConfig, TableStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn table(stacks: &[u32]) -> PokerState {
    let mut s = PokerState::new("t", TableConfig::default());
    for (i, &chips) in stacks.iter().enumerate() {
        s.players
            .push(PlayerState::new(format!("p{i}").into(), format!("P{i}"), chips));
    }
    s
}

/// Drain automatic transitions the way the supervisor does.
fn settle(mut s: PokerState) -> PokerState {
    loop {
        if s.table_status != TableStatus::Playing {
            break;
        }
        if s.phase.street == Street::Showdown {
            s = close_round(s).unwrap();
            continue;
        }
        if s.in_hand_seats().len() <= 1 || s.current_player_index.is_none() {
            s = transition_phase(s).unwrap();
            continue;
        }
        break;
    }
    s
}

#[test]
fn short_big_blind_run_out_caps_the_award() {
    // p0 is dealer/SB with a full stack; p1 posts a 15-chip big blind all-in
    let mut rng = StdRng::seed_from_u64(1234);
    let s = deal_cards(table(&[500, 15]), &mut rng).unwrap();
    assert_eq!(s.players[1].status, PlayerStatus::AllIn);
    assert_eq!(s.round.current_bet, 20);

    // the caller covers the nominal big blind; the board then runs out
    // without further action
    let s = process_move(s, &"p0".into(), Move::Call).unwrap();
    let mut s = s;
    while s.phase.street != Street::Showdown {
        assert_eq!(s.current_player_index, None);
        s = transition_phase(s).unwrap();
    }
    assert_eq!(s.community.len(), 5);

    let rank0 = evaluate_best_hand(&s.players[0].hand, &s.community);
    let rank1 = evaluate_best_hand(&s.players[1].hand, &s.community);
    let s = close_round(s).unwrap();

    // chips conserved whatever the outcome
    let total: u32 = s.players.iter().map(|p| p.chips).sum();
    assert_eq!(total, 515);
    // the short stack can at most double through; the overage returns to p0
    assert!(s.players[1].chips <= 30);
    match rank1.cmp(&rank0) {
        std::cmp::Ordering::Greater => {
            assert_eq!(s.players[1].chips, 30);
            assert_eq!(s.players[0].chips, 485);
        }
        std::cmp::Ordering::Less => {
            assert_eq!(s.players[0].chips, 515);
            assert_eq!(s.players[1].status, PlayerStatus::Eliminated);
            assert_eq!(s.table_status, TableStatus::GameOver);
        }
        std::cmp::Ordering::Equal => {
            assert_eq!(s.players[1].chips, 15);
            assert_eq!(s.players[0].chips, 500);
        }
    }
}

#[test]
fn mutual_all_in_preflop_runs_the_board_out() {
    let mut rng = StdRng::seed_from_u64(77);
    let s = deal_cards(table(&[300, 300]), &mut rng).unwrap();
    let s = process_move(s, &"p0".into(), Move::AllIn).unwrap();
    let s = process_move(s, &"p1".into(), Move::Call).unwrap();
    let s = settle(s);

    // someone owns all 600 chips now, or the pot split back evenly
    let total: u32 = s.players.iter().map(|p| p.chips).sum();
    assert_eq!(total, 600);
    assert!(matches!(
        s.table_status,
        TableStatus::GameOver | TableStatus::RoundOver
    ));
    let result = s.last_round_result.as_ref().unwrap();
    assert_eq!(result.pot, 600);
    assert_eq!(result.hand_results.len(), 2);
}

#[test]
fn lone_remaining_actor_still_decides_preflop() {
    // three-handed: both blinds are short and all-in from the deal; the
    // button still owes a pre-flop decision before the run-out
    let mut rng = StdRng::seed_from_u64(5);
    let s = deal_cards(table(&[400, 8, 12]), &mut rng).unwrap();
    assert_eq!(s.players[1].status, PlayerStatus::AllIn);
    assert_eq!(s.players[2].status, PlayerStatus::AllIn);
    assert_eq!(s.current_player().unwrap().id, "p0".into());

    let s = process_move(s, &"p0".into(), Move::Call).unwrap();
    let s = settle(s);
    let total: u32 = s.players.iter().map(|p| p.chips).sum();
    assert_eq!(total, 420);
    // the button wins back at least the layer nobody else could contest
    // (its contribution above the deepest short stack)
    assert!(s.players[0].chips >= 400 - 20 + 8);
}
