//! Line/state-machine decoders for tools with no structured output mode.

pub mod autopep8_text;
pub mod bandit_text;
pub mod bazel_build;
pub mod black_text;
pub mod cargo_build;
pub mod clang_tidy_text;
pub mod cmake_build;
pub mod coverage_text;
pub mod docker_build;
pub mod duckdb_test;
pub mod flake8_text;
pub mod gdb_lldb;
pub mod generic_lint;
pub mod gotest_text;
pub mod gradle_build;
pub mod gtest_text;
pub mod isort_text;
pub mod junit_text;
pub mod make_error;
pub mod maven_build;
pub mod mocha_chai_text;
pub mod msbuild;
pub mod mypy_text;
pub mod node_build;
pub mod nunit_xunit_text;
pub mod pylint_text;
pub mod python_build;
pub mod pytest_cov_text;
pub mod pytest_text;
pub mod rspec_text;
pub mod valgrind;
pub mod yapf_text;

pub mod ci;

use crate::registry::Registry;

pub fn register_all(registry: &mut Registry) {
    registry.register(pytest_text::PytestText);
    registry.register(gotest_text::GotestText);
    registry.register(gtest_text::GtestText);
    registry.register(rspec_text::RspecText);
    registry.register(mocha_chai_text::MochaChaiText);
    registry.register(junit_text::JunitText);
    registry.register(bazel_build::BazelBuild);
    registry.register(maven_build::MavenBuild);
    registry.register(gradle_build::GradleBuild);
    registry.register(cmake_build::CmakeBuild);
    registry.register(make_error::MakeError);
    registry.register(mypy_text::MypyText);
    registry.register(duckdb_test::DuckdbTest);
    registry.register(pytest_cov_text::PytestCovText);
    registry.register(coverage_text::CoverageText);
    registry.register(valgrind::Valgrind);
    registry.register(gdb_lldb::GdbLldb);
    registry.register(pylint_text::PylintText);
    registry.register(flake8_text::Flake8Text);
    registry.register(black_text::BlackText);
    registry.register(isort_text::IsortText);
    registry.register(bandit_text::BanditText);
    registry.register(autopep8_text::Autopep8Text);
    registry.register(yapf_text::YapfText);
    registry.register(docker_build::DockerBuild);
    registry.register(cargo_build::CargoBuild);
    registry.register(python_build::PythonBuild);
    registry.register(node_build::NodeBuild);
    registry.register(msbuild::Msbuild);
    registry.register(nunit_xunit_text::NunitXunitText);
    registry.register(clang_tidy_text::ClangTidyText);
    registry.register(generic_lint::GenericLint);
    ci::register_all(registry);
}
