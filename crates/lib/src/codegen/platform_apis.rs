//! Platform API registration unit.
//!
//! Every platform with an `api/api.h` contributes a `register_<p>_api()` /
//! `unregister_<p>_api()` pair. None of them are core platforms, so the core
//! registration functions are emitted with empty bodies.

/// Render the registration source for `platforms`, in the given order.
pub fn platform_apis_source<S: AsRef<str>>(platforms: &[S]) -> String {
  let core_platforms: [&str; 0] = [];

  let includes = platforms
    .iter()
    .map(|p| format!("#include \"{}/api/api.h\"", p.as_ref()))
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    "#include \"register_platform_apis.h\"\n\
     \n\
     {includes}\n\
     \n\
     void register_core_platform_apis() {{\n\
     \t{core_reg}\n\
     }}\n\
     \n\
     void unregister_core_platform_apis() {{\n\
     \t{core_unreg}\n\
     }}\n\
     \n\
     void register_platform_apis() {{\n\
     \t{reg}\n\
     }}\n\
     \n\
     void unregister_platform_apis() {{\n\
     \t{unreg}\n\
     }}\n",
    includes = includes,
    core_reg = calls("register", &core_platforms),
    core_unreg = calls("unregister", &core_platforms),
    reg = calls("register", platforms),
    unreg = calls("unregister", platforms),
  )
}

fn calls<S: AsRef<str>>(verb: &str, platforms: &[S]) -> String {
  platforms
    .iter()
    .map(|p| format!("{}_{}_api();", verb, p.as_ref()))
    .collect::<Vec<_>>()
    .join("\n\t")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registers_each_platform() {
    let source = platform_apis_source(&["android", "web"]);

    assert!(source.starts_with("#include \"register_platform_apis.h\"\n\n"));
    assert!(source.contains("#include \"android/api/api.h\"\n#include \"web/api/api.h\"\n"));
    assert!(source.contains("void register_platform_apis() {\n\tregister_android_api();\n\tregister_web_api();\n}\n"));
    assert!(
      source.contains("void unregister_platform_apis() {\n\tunregister_android_api();\n\tunregister_web_api();\n}\n")
    );
  }

  #[test]
  fn core_functions_are_empty() {
    let source = platform_apis_source(&["android"]);
    assert!(source.contains("void register_core_platform_apis() {\n\t\n}\n"));
    assert!(source.contains("void unregister_core_platform_apis() {\n\t\n}\n"));
  }

  #[test]
  fn no_platforms_still_defines_functions() {
    let source = platform_apis_source::<&str>(&[]);
    assert!(source.contains("void register_platform_apis() {\n\t\n}\n"));
  }
}
