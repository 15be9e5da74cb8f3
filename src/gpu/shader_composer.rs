use std::{borrow::Cow, fmt};

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// Errors raised while registering or composing WGSL sources.
#[derive(Debug)]
pub enum ShaderError {
    /// A shared module failed to register with the composer.
    Module {
        /// File path the module was registered under.
        file_path: &'static str,
        /// Underlying composer failure.
        source: Box<ComposerError>,
    },
    /// A consuming shader failed to compose into a naga module.
    Compose {
        /// File path of the shader being composed.
        file_path: String,
        /// Underlying composer failure.
        source: Box<ComposerError>,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module { file_path, source } => {
                write!(f, "failed to register shader module '{file_path}': {source}")
            }
            Self::Compose { file_path, source } => {
                write!(f, "failed to compose shader '{file_path}': {source}")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Module { source, .. } | Self::Compose { source, .. } => {
                Some(source.as_ref())
            }
        }
    }
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/noise.wgsl"),
        file_path: "modules/noise.wgsl",
    },
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import glowcloud::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Build a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Module`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| ShaderError::Module {
                    file_path: m.file_path,
                    source: Box::new(e),
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compose`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module = self.compose_naga(source, file_path)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::Compose`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError::Compose {
                file_path: file_path.to_owned(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTICLE_CLOUD: &str =
        include_str!("../../assets/shaders/raster/particle_cloud.wgsl");

    #[test]
    fn shared_modules_register() {
        assert!(ShaderComposer::new().is_ok());
    }

    #[test]
    fn particle_cloud_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(PARTICLE_CLOUD, "particle_cloud.wgsl")
            .unwrap_or_else(|e| panic!("{e}"));

        let entry_points: Vec<&str> =
            module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn composed_shader_validates() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(PARTICLE_CLOUD, "particle_cloud.wgsl")
            .unwrap();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        assert!(validator.validate(&module).is_ok());
    }

    #[test]
    fn unknown_import_is_reported() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import glowcloud::missing::thing\n\
                      @fragment fn fs_main() -> @location(0) vec4<f32> { return thing(); }";
        let err = composer.compose_naga(source, "broken.wgsl").unwrap_err();
        assert!(err.to_string().contains("broken.wgsl"));
    }
}
