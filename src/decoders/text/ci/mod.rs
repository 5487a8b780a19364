//! CI-engine console/log decoders: the log shape each engine's runner
//! prints, distinct from the build-tool output (`cargo_build`, `maven_build`,
//! …) that those runners invoke as a subprocess.

pub mod ansible_text;
pub mod drone_ci_text;
pub mod github_actions_text;
pub mod github_cli;
pub mod gitlab_ci_text;
pub mod jenkins_text;
pub mod terraform_text;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    registry.register(github_actions_text::GithubActionsText);
    registry.register(gitlab_ci_text::GitlabCiText);
    registry.register(jenkins_text::JenkinsText);
    registry.register(drone_ci_text::DroneCiText);
    registry.register(terraform_text::TerraformText);
    registry.register(ansible_text::AnsibleText);
    registry.register(github_cli::GithubCli);
}
