pub const APP_NAME: &str = "gdbuild";

/// Default external build tool program.
pub const BUILD_TOOL: &str = "scons";

/// Flag that makes an editor binary write its extension API description.
pub const DUMP_API_FLAG: &str = "--dump-extension-api";

pub const API_FILE_NAME: &str = "extension_api.json";
pub const INTERFACE_HEADER_NAME: &str = "gdextension_interface.h";
pub const FRAMEWORK_SCRIPT_NAME: &str = "make-libgodot.framework";

pub const ENV_ROOT: &str = "GDBUILD_ROOT";
pub const ENV_JOBS: &str = "GDBUILD_JOBS";
pub const ENV_BUILD_TOOL: &str = "GDBUILD_SCONS";

/// Used when the host CPU count cannot be determined.
pub const FALLBACK_CPUS: usize = 4;
