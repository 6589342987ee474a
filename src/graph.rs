//! Target graph
//!
//! Build steps are named targets with dependency edges. Running a target runs
//! its transitive dependencies first, each exactly once, in depth-first order
//! following the declaration order of `depends_on`.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::{BuildError, Result};

/// What a target does when it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Clean,
    Version,
    Compile,
    Test,
    CopyArtifacts,
    Pack,
    Publish,
    /// User-defined argv from `[[targets]]`
    Command(Vec<String>),
    /// Aggregates dependencies, does nothing itself
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub description: String,
    pub depends_on: Vec<String>,
    pub action: Action,
}

impl Target {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Target {
            name: name.into(),
            description: String::new(),
            depends_on: Vec::new(),
            action,
        }
    }

    pub fn depends_on(mut self, deps: &[&str]) -> Self {
        self.depends_on = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

/// Named targets in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TargetGraph {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl TargetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in clean → build → test → pack → publish chain.
    pub fn standard() -> Self {
        let mut graph = TargetGraph {
            targets: vec![
                Target::new("Clean", Action::Clean).describe("Remove the artifacts directory"),
                Target::new("Version", Action::Version).describe("Report the resolved version"),
                Target::new("Build", Action::Compile)
                    .depends_on(&["Clean", "Version"])
                    .describe("Compile the solution with version stamps"),
                Target::new("Test", Action::Test)
                    .depends_on(&["Build"])
                    .describe("Run every configured test runner"),
                Target::new("CopyArtifacts", Action::CopyArtifacts)
                    .depends_on(&["Build"])
                    .describe("Copy build outputs into the release layout"),
                Target::new("Pack", Action::Pack)
                    .depends_on(&["Test", "CopyArtifacts"])
                    .describe("Create NuGet and symbol packages"),
                Target::new("Publish", Action::Publish)
                    .depends_on(&["Pack"])
                    .describe("Push packages to every configured feed"),
                Target::new("Default", Action::Group)
                    .depends_on(&["Pack"])
                    .describe("Build, test and package"),
            ],
            index: HashMap::new(),
        };
        graph.reindex();
        graph
    }

    /// The standard graph plus the custom targets from configuration.
    ///
    /// Every dependency edge is checked, so a typo in `depends_on` fails
    /// here rather than when the broken target is first requested.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut graph = TargetGraph::standard();
        for custom in &config.targets {
            let mut target = Target::new(&custom.name, Action::Command(custom.command.clone()))
                .describe(&custom.description);
            target.depends_on = custom.depends_on.clone();
            graph.add(target)?;
        }
        graph.validate()?;
        Ok(graph)
    }

    fn reindex(&mut self) {
        self.index = self
            .targets
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
    }

    /// Registers a target. Names are unique.
    pub fn add(&mut self, target: Target) -> Result<()> {
        if self.index.contains_key(&target.name) {
            return Err(BuildError::graph(format!(
                "target '{}' is defined more than once",
                target.name
            )));
        }
        self.index.insert(target.name.clone(), self.targets.len());
        self.targets.push(target);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.index.get(name).map(|&i| &self.targets[i])
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Checks every edge and rejects cycles.
    pub fn validate(&self) -> Result<()> {
        let names: Vec<String> = self.targets.iter().map(|t| t.name.clone()).collect();
        self.plan(&names).map(|_| ())
    }

    /// Orders `requested` and everything they depend on.
    ///
    /// # Returns
    /// * `Ok(Vec<&Target>)` - Dependencies before dependents, each target once
    /// * `Err(BuildError::Graph)` - Unknown target, unknown dependency or cycle
    pub fn plan(&self, requested: &[String]) -> Result<Vec<&Target>> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut stack: Vec<&str> = Vec::new();
        let mut order = Vec::new();

        for name in requested {
            let target = self
                .get(name)
                .ok_or_else(|| BuildError::graph(format!("unknown target '{}'", name)))?;
            self.visit(target, &mut marks, &mut stack, &mut order)?;
        }

        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        target: &'a Target,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
        order: &mut Vec<&'a Target>,
    ) -> Result<()> {
        match marks.get(target.name.as_str()) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack
                    .iter()
                    .position(|n| *n == target.name)
                    .unwrap_or(0);
                let mut cycle: Vec<&str> = stack[start..].to_vec();
                cycle.push(&target.name);
                return Err(BuildError::graph(format!(
                    "dependency cycle: {}",
                    cycle.join(" -> ")
                )));
            }
            None => {}
        }

        marks.insert(&target.name, Mark::Visiting);
        stack.push(&target.name);

        for dep in &target.depends_on {
            let dependency = self.get(dep).ok_or_else(|| {
                BuildError::graph(format!(
                    "target '{}' depends on unknown target '{}'",
                    target.name, dep
                ))
            })?;
            self.visit(dependency, marks, stack, order)?;
        }

        stack.pop();
        marks.insert(&target.name, Mark::Done);
        order.push(target);
        Ok(())
    }
}
