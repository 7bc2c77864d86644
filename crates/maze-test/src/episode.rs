//! Episode runner
//!
//! Plays one or two agents on a [`MazeMap`] for a fixed number of turns.
//! Messages from one agent reach the other on its next turn unless the
//! runner drops them.

use maze_core::{
    Action, Agent, AgentConfig, AgentRng, CellCategory, Decision, Message, Position, Role,
    SearchMode,
};
use serde::{Deserialize, Serialize};

use crate::maze::MazeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    pub max_turns: u32,
    pub seed: u64,
    /// Chance, in percent, that a message is lost in transit
    pub drop_percent: u32,
    pub search_mode: SearchMode,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            seed: 0,
            drop_percent: 0,
            search_mode: SearchMode::Optimistic,
        }
    }
}

impl EpisodeConfig {
    /// Configuration for one agent of the team
    pub fn agent_config(&self, role: Role, index: u64) -> AgentConfig {
        AgentConfig::new(role, self.max_turns)
            .with_seed(self.seed.wrapping_add(index))
            .with_search_mode(self.search_mode)
    }
}

/// One action taken by one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub agent: usize,
    pub action: char,
    pub decision: Decision,
    /// True position after the action was applied
    pub position: Position,
    /// The agent tried to walk into a wall
    pub bumped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub turns_played: u32,
    /// Turn on which each agent left through the exit
    pub exited: Vec<Option<u32>>,
    pub goals_collected: usize,
    pub goals_total: usize,
    pub wall_bumps: usize,
    /// Activations on a cell with nothing to use
    pub idle_activations: usize,
    pub messages_dropped: usize,
    pub trace: Vec<TurnRecord>,
}

struct Seat {
    agent: Agent,
    position: Position,
    exited: Option<u32>,
    inbox: Option<Message>,
}

pub struct Episode {
    map: MazeMap,
    seats: Vec<Seat>,
    config: EpisodeConfig,
    rng: AgentRng,
    report: EpisodeReport,
}

impl Episode {
    /// Seat the given agents on the start cell
    pub fn new(map: MazeMap, agents: Vec<Agent>, config: EpisodeConfig) -> Self {
        let report = EpisodeReport {
            exited: vec![None; agents.len()],
            goals_total: map.goal_count(),
            ..Default::default()
        };
        let seats = agents
            .into_iter()
            .map(|agent| Seat {
                agent,
                position: Position::ORIGIN,
                exited: None,
                inbox: None,
            })
            .collect();
        Self {
            map,
            seats,
            rng: AgentRng::new(config.seed ^ 0x5eed),
            config,
            report,
        }
    }

    /// Collector and scout team
    pub fn team(map: MazeMap, config: EpisodeConfig) -> Result<Self, maze_core::ConfigError> {
        let agents = vec![
            Agent::new(config.agent_config(Role::Collector, 0))?,
            Agent::new(config.agent_config(Role::Scout, 1))?,
        ];
        Ok(Self::new(map, agents, config))
    }

    /// Place a message in an agent's inbox for its next turn
    pub fn deliver(&mut self, agent: usize, message: Message) {
        if let Some(seat) = self.seats.get_mut(agent) {
            seat.inbox = Some(message);
        }
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.seats.get(index).map(|s| &s.agent)
    }

    pub fn position(&self, index: usize) -> Option<Position> {
        self.seats.get(index).map(|s| s.position)
    }

    pub fn is_finished(&self) -> bool {
        self.report.turns_played >= self.config.max_turns
            || self.seats.iter().all(|s| s.exited.is_some())
    }

    /// Play one turn for every agent still in the maze
    pub fn step(&mut self) {
        let turn = self.report.turns_played;
        let seat_count = self.seats.len();

        for index in 0..seat_count {
            if self.seats[index].exited.is_some() {
                continue;
            }

            let seat = &mut self.seats[index];
            let view = self.map.percepts_at(seat.position);
            let inbound = seat.inbox.take();
            let outcome = seat.agent.turn(&view, inbound.as_ref());

            let mut bumped = false;
            match outcome.action {
                Action::Move(dir) => {
                    let next = seat.position.step(dir);
                    if self.map.get(next).is_wall() {
                        bumped = true;
                        self.report.wall_bumps += 1;
                    } else {
                        seat.position = next;
                    }
                }
                Action::Activate => match self.map.get(seat.position) {
                    CellCategory::Goal(_) => {
                        self.map.set(seat.position, CellCategory::Free);
                        self.report.goals_collected += 1;
                    }
                    CellCategory::Teleport(color) => {
                        if let Some(dest) = self.map.teleport_destination(color) {
                            seat.position = dest;
                        }
                    }
                    CellCategory::Exit => {
                        seat.exited = Some(turn);
                        self.report.exited[index] = Some(turn);
                    }
                    CellCategory::Wall | CellCategory::Free => {
                        self.report.idle_activations += 1;
                    }
                },
            }

            self.report.trace.push(TurnRecord {
                turn,
                agent: index,
                action: outcome.action.code(),
                decision: outcome.decision,
                position: seat.position,
                bumped,
            });

            if seat_count > 1 {
                let peer = (index + 1) % seat_count;
                if self.rng.chance(self.config.drop_percent) {
                    self.report.messages_dropped += 1;
                } else {
                    self.seats[peer].inbox = Some(outcome.message);
                }
            }
        }

        self.report.turns_played += 1;
    }

    /// Play until every agent has exited or the budget is spent
    pub fn run(mut self) -> EpisodeReport {
        while !self.is_finished() {
            self.step();
        }
        log::info!(
            "episode over after {} turns: {} of {} goals, exited {:?}",
            self.report.turns_played,
            self.report.goals_collected,
            self.report.goals_total,
            self.report.exited
        );
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_agent_corridor_exit() {
        let map = MazeMap::parse("wwwwww\nwS..rw\nwwwwww").unwrap();
        let config = EpisodeConfig {
            max_turns: 30,
            ..Default::default()
        };
        let agent = Agent::new(config.agent_config(Role::Collector, 0)).unwrap();
        let report = Episode::new(map, vec![agent], config).run();

        assert!(report.exited[0].is_some());
        assert_eq!(report.wall_bumps, 0);
    }

    #[test]
    fn test_dropped_messages_are_counted() {
        let map = MazeMap::parse("wwwww\nwS..w\nwwwww").unwrap();
        let config = EpisodeConfig {
            max_turns: 5,
            drop_percent: 100,
            ..Default::default()
        };
        let report = Episode::team(map, config).unwrap().run();
        assert_eq!(report.turns_played, 5);
        assert_eq!(report.messages_dropped, 10);
    }
}
