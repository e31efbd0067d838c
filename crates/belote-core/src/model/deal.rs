use crate::model::card::{Card, CardSet};
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::seat::{Seat, Team};
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use crate::rules;
use std::{array, fmt, vec::Vec};

/// Trump suit and the seat that bid it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub trump: Suit,
    pub taker: Seat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidRound {
    First,
    Second,
}

#[derive(Debug, Clone)]
pub struct AuctionState {
    turn: Seat,
    round: BidRound,
    passes: u8,
}

impl AuctionState {
    fn new(first_bidder: Seat) -> Self {
        Self {
            turn: first_bidder,
            round: BidRound::First,
            passes: 0,
        }
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn round(&self) -> BidRound {
        self.round
    }
}

#[derive(Debug, Clone)]
pub enum DealPhase {
    Bidding(AuctionState),
    Playing {
        contract: Contract,
        belote_team: Option<Team>,
    },
}

#[derive(Debug, Clone)]
pub struct DealState {
    hands: [Hand; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    dealer: Seat,
    middle_card: Card,
    stock: Vec<Card>,
    phase: DealPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    Continue { next: Seat, round: BidRound },
    TrumpSet { taker: Seat, trump: Suit },
    Thrown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    NotInBiddingPhase,
    OutOfTurn { expected: Seat, actual: Seat },
    WrongSuitForRound { required: Suit },
    MiddleSuitNotAllowed(Suit),
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::NotInBiddingPhase => write!(f, "deal is not in the bidding phase"),
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid next but got {actual}")
            }
            BidError::WrongSuitForRound { required } => {
                write!(f, "first round may only take at {required}")
            }
            BidError::MiddleSuitNotAllowed(suit) => {
                write!(f, "second round may not name the middle suit {suit}")
            }
        }
    }
}

impl std::error::Error for BidError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat, points: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    IllegalCard(Card),
    Trick(super::trick::TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "deal is not in the playing phase"),
            PlayError::CardNotInHand(card) => write!(f, "card {card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::IllegalCard(card) => {
                write!(f, "card {card} violates the follow or trump obligations")
            }
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

impl DealState {
    /// Deals 3 then 2 cards to each seat from the dealer's left, turns the
    /// next card face up and keeps the remaining 11 in the stock.
    pub fn initial_deal(deck: &Deck, dealer: Seat) -> Self {
        let mut hands = array::from_fn(|_| Hand::new());
        let cards = deck.cards();
        let mut next = 0usize;

        for batch in [3usize, 2usize] {
            let mut seat = dealer.next();
            for _ in 0..4 {
                for _ in 0..batch {
                    hands[seat.index()].add(cards[next]);
                    next += 1;
                }
                seat = seat.next();
            }
        }

        let middle_card = cards[next];
        let stock = cards[next + 1..].to_vec();

        Self {
            hands,
            current_trick: Trick::new(dealer.next()),
            trick_history: Vec::new(),
            dealer,
            middle_card,
            stock,
            phase: DealPhase::Bidding(AuctionState::new(dealer.next())),
        }
    }

    pub fn dealer(&self) -> Seat {
        self.dealer
    }

    pub fn middle_card(&self) -> Card {
        self.middle_card
    }

    pub fn phase(&self) -> &DealPhase {
        &self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn current_trick_mut(&mut self) -> &mut Trick {
        &mut self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.trick_history.len() == 8
    }

    pub fn trump(&self) -> Option<Suit> {
        match &self.phase {
            DealPhase::Bidding(_) => None,
            DealPhase::Playing { contract, .. } => Some(contract.trump),
        }
    }

    pub fn taker(&self) -> Option<Seat> {
        match &self.phase {
            DealPhase::Bidding(_) => None,
            DealPhase::Playing { contract, .. } => Some(contract.taker),
        }
    }

    pub fn belote_team(&self) -> Option<Team> {
        match &self.phase {
            DealPhase::Bidding(_) => None,
            DealPhase::Playing { belote_team, .. } => *belote_team,
        }
    }

    /// Submit one auction decision. `None` passes, `Some(suit)` takes.
    pub fn submit_bid(&mut self, seat: Seat, bid: Option<Suit>) -> Result<BidOutcome, BidError> {
        let auction = match &mut self.phase {
            DealPhase::Bidding(auction) => auction,
            DealPhase::Playing { .. } => return Err(BidError::NotInBiddingPhase),
        };

        if auction.turn != seat {
            return Err(BidError::OutOfTurn {
                expected: auction.turn,
                actual: seat,
            });
        }

        let middle_suit = self.middle_card.suit;
        match bid {
            Some(suit) => {
                match auction.round {
                    BidRound::First if suit != middle_suit => {
                        return Err(BidError::WrongSuitForRound {
                            required: middle_suit,
                        });
                    }
                    BidRound::Second if suit == middle_suit => {
                        return Err(BidError::MiddleSuitNotAllowed(suit));
                    }
                    _ => {}
                }
                self.resolve_auction(Contract { trump: suit, taker: seat });
                Ok(BidOutcome::TrumpSet {
                    taker: seat,
                    trump: suit,
                })
            }
            None => {
                auction.passes += 1;
                auction.turn = auction.turn.next();
                match (auction.passes, auction.round) {
                    (4, BidRound::First) => {
                        auction.round = BidRound::Second;
                        auction.passes = 0;
                        Ok(BidOutcome::Continue {
                            next: auction.turn,
                            round: BidRound::Second,
                        })
                    }
                    (4, BidRound::Second) => Ok(BidOutcome::Thrown),
                    _ => Ok(BidOutcome::Continue {
                        next: auction.turn,
                        round: auction.round,
                    }),
                }
            }
        }
    }

    /// Completes the deal for a resolved auction: the taker receives the
    /// middle card plus 2 from the stock, everyone else 3.
    fn resolve_auction(&mut self, contract: Contract) {
        let mut next = 0usize;
        let mut seat = self.dealer.next();
        for _ in 0..4 {
            let count = if seat == contract.taker { 2 } else { 3 };
            for _ in 0..count {
                self.hands[seat.index()].add(self.stock[next]);
                next += 1;
            }
            seat = seat.next();
        }
        self.hands[contract.taker.index()].add(self.middle_card);
        self.stock.clear();

        let belote_team = self.detect_belote_team(contract.trump);
        self.phase = DealPhase::Playing {
            contract,
            belote_team,
        };
    }

    fn detect_belote_team(&self, trump: Suit) -> Option<Team> {
        let king = Card::new(Rank::King, trump);
        let queen = Card::new(Rank::Queen, trump);
        Seat::LOOP
            .iter()
            .copied()
            .find(|seat| {
                let hand = &self.hands[seat.index()];
                hand.contains(king) && hand.contains(queen)
            })
            .map(Seat::team)
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        let trump = match &self.phase {
            DealPhase::Playing { contract, .. } => contract.trump,
            DealPhase::Bidding(_) => return Err(PlayError::NotInPlayPhase),
        };

        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        let expected = self
            .current_trick
            .plays()
            .last()
            .map(|p| p.seat.next())
            .unwrap_or(self.current_trick.leader());
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let legal = rules::legal_plays(&self.hands[seat.index()], &self.current_trick, trump, seat);
        if !legal.contains(&card) {
            return Err(PlayError::IllegalCard(card));
        }

        let _ = self.hands[seat.index()].remove(card);
        self.current_trick
            .play(seat, card)
            .map_err(PlayError::Trick)?;

        if self.current_trick.is_complete() {
            let winning = self
                .current_trick
                .winning_play(trump)
                .ok_or(PlayError::Trick(super::trick::TrickError::TrickComplete))?;
            let points = self.current_trick.points(trump);
            self.complete_trick(winning.seat);
            Ok(PlayOutcome::TrickCompleted {
                winner: winning.seat,
                points,
            })
        } else {
            Ok(PlayOutcome::Played)
        }
    }

    pub fn complete_trick(&mut self, next_leader: Seat) {
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(next_leader));
        self.trick_history.push(finished);
    }

    /// Trick points banked so far by each team, dix de der excluded.
    pub fn team_trick_points(&self) -> [u16; 2] {
        let mut totals = [0u16; 2];
        if let Some(trump) = self.trump() {
            for trick in &self.trick_history {
                if let Some(winner) = trick.winner(trump) {
                    totals[winner.team().index()] += u16::from(trick.points(trump));
                }
            }
        }
        totals
    }

    pub fn last_trick_winner(&self) -> Option<Seat> {
        let trump = self.trump()?;
        self.trick_history.last().and_then(|trick| trick.winner(trump))
    }

    /// Union of every card in the trick history and the current trick.
    pub fn played_cards(&self) -> CardSet {
        let mut set = CardSet::EMPTY;
        for trick in &self.trick_history {
            for play in trick.plays() {
                set.insert(play.card);
            }
        }
        for play in self.current_trick.plays() {
            set.insert(play.card);
        }
        set
    }
}
