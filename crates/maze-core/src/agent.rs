//! Per-turn entry point
//!
//! An [`Agent`] owns one episode's [`AgentState`] and runs one atomic turn
//! per host call: interpret percepts, merge whatever the partner last sent,
//! decide, and publish a fresh snapshot. Nothing is assumed about whether
//! the partner has seen the previous snapshot.

use serde::{Deserialize, Serialize};

use crate::config::{AgentConfig, Role};
use crate::error::{AgentError, ConfigError};
use crate::message::Message;
use crate::percept::{self, Percepts};
use crate::policy::{Action, Decision, Policy};
use crate::rng::AgentRng;
use crate::state::AgentState;

/// Result of one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub action: Action,
    pub message: Message,
    pub decision: Decision,
}

#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    policy: Policy,
    state: AgentState,
    rng: AgentRng,
}

impl Agent {
    /// Create an agent for a new episode
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => AgentRng::new(seed),
            None => AgentRng::from_entropy(),
        };
        Ok(Self {
            policy: Policy::from_config(&config),
            state: AgentState::new(config.max_turns),
            rng,
            config,
        })
    }

    pub fn collector(max_turns: u32) -> Result<Self, ConfigError> {
        Self::new(AgentConfig::new(Role::Collector, max_turns))
    }

    pub fn scout(max_turns: u32) -> Result<Self, ConfigError> {
        Self::new(AgentConfig::new(Role::Scout, max_turns))
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.config.role
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Hand back the world model at episode end
    pub fn into_state(self) -> AgentState {
        self.state
    }

    /// Play one turn.
    ///
    /// `inbound` is the partner's latest message, if one arrived. An absent
    /// or empty message leaves the outcome exactly as if there were no
    /// partner at all.
    pub fn turn(&mut self, percepts: &Percepts, inbound: Option<&Message>) -> TurnOutcome {
        let state = &mut self.state;
        state.begin_turn();
        state.visit_current();
        percept::observe(state, percepts);
        if let Some(msg) = inbound {
            msg.merge_into(state);
        }

        let (decision, action) = self.policy.decide(state, percepts, &mut self.rng);
        log::debug!(
            "{} turn {} at {}: {decision} -> {action} ({} left, frontier {})",
            self.config.role,
            state.turn,
            state.position,
            state.turns_left(),
            state.frontier.len()
        );

        TurnOutcome {
            action,
            message: Message::from_state(state),
            decision,
        }
    }

    /// Play one turn from raw host percept codes (`X`, `N`, `NE`, ... keys)
    pub fn turn_with_codes<I, K, V>(
        &mut self,
        codes: I,
        inbound: Option<&Message>,
    ) -> Result<TurnOutcome, AgentError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let percepts = Percepts::from_codes(codes)?;
        Ok(self.turn(&percepts, inbound))
    }
}
