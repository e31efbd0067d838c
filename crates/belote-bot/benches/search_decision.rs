use belote_bot::{BeloteAgent, SearchTier};
use belote_core::model::deal::DealState;
use belote_core::model::deck::Deck;
use belote_core::model::seat::Seat;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_opening_play(seed: u64, tier: SearchTier) {
    let deck = Deck::shuffled_with_seed(seed);
    let mut deal = DealState::initial_deal(&deck, Seat::West);
    let leader = deal.dealer().next();
    let middle = deal.middle_card();
    let _ = deal.submit_bid(leader, Some(middle.suit));

    let hand = deal.hand(leader).clone();
    let mut agent = BeloteAgent::new(leader);
    agent.reset_beliefs(&hand);
    agent.on_trump_determined(middle, leader);

    let _ = black_box(agent.choose_play(deal.current_trick(), &hand, tier));
}

fn search_decision_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_decision");
    for (seed, tier) in [
        (11u64, SearchTier::Shallow),
        (47u64, SearchTier::Shallow),
        (11u64, SearchTier::Medium),
    ] {
        group.bench_function(format!("{:?}_seed{}", tier, seed), |b| {
            b.iter(|| bench_opening_play(seed, tier))
        });
    }
    group.finish();
}

criterion_group!(benches, search_decision_bench);
criterion_main!(benches);
