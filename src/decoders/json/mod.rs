pub mod bandit_json;
pub mod cargo_test_json;
pub mod clippy_json;
pub mod eslint_json;
pub mod gotest_json;
pub mod hadolint_json;
pub mod ktlint_json;
pub mod kube_score_json;
pub mod lintr_json;
pub mod markdownlint_json;
pub mod phpstan_json;
pub mod pytest_json;
pub mod rubocop_json;
pub mod shellcheck_json;
pub mod spotbugs_json;
pub mod sqlfluff_json;
pub mod stylelint_json;
pub mod swiftlint_json;
pub mod tflint_json;
pub mod yamllint_json;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    registry.register(pytest_json::PytestJson);
    registry.register(eslint_json::EslintJson);
    registry.register(clippy_json::ClippyJson);
    registry.register(cargo_test_json::CargoTestJson);
    registry.register(rubocop_json::RubocopJson);
    registry.register(gotest_json::GotestJson);
    registry.register(swiftlint_json::SwiftlintJson);
    registry.register(phpstan_json::PhpstanJson);
    registry.register(shellcheck_json::ShellcheckJson);
    registry.register(stylelint_json::StylelintJson);
    registry.register(markdownlint_json::MarkdownlintJson);
    registry.register(yamllint_json::YamllintJson);
    registry.register(bandit_json::BanditJson);
    registry.register(spotbugs_json::SpotbugsJson);
    registry.register(ktlint_json::KtlintJson);
    registry.register(hadolint_json::HadolintJson);
    registry.register(lintr_json::LintrJson);
    registry.register(sqlfluff_json::SqlfluffJson);
    registry.register(tflint_json::TflintJson);
    registry.register(kube_score_json::KubeScoreJson);
}
