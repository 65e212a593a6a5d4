//! Potion side-effect screen distortion: contrast, colour filter and vignette.
//!
//! Implements a fullscreen post-processing pass on the 2D render graph. Game
//! code never touches the camera uniform directly; it writes the
//! [`SideEffectVisuals`] resource and the uniform follows.

use bevy::{
    asset::load_internal_asset,
    core_pipeline::{
        core_2d::graph::{Core2d, Node2d},
        fullscreen_vertex_shader::fullscreen_shader_vertex_state,
    },
    ecs::query::QueryItem,
    prelude::*,
    render::{
        extract_component::{
            ComponentUniforms, DynamicUniformIndex, ExtractComponent, ExtractComponentPlugin,
            UniformComponentPlugin,
        },
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        render_resource::{
            binding_types::{sampler, texture_2d, uniform_buffer},
            BindGroupEntries, BindGroupLayout, BindGroupLayoutEntries, CachedRenderPipelineId,
            ColorTargetState, ColorWrites, FragmentState, MultisampleState, Operations,
            PipelineCache, PrimitiveState, RenderPassColorAttachment, RenderPassDescriptor,
            RenderPipelineDescriptor, Sampler, SamplerBindingType, SamplerDescriptor, ShaderStages,
            ShaderType, TextureFormat, TextureSampleType,
        },
        renderer::{RenderContext, RenderDevice},
        view::ViewTarget,
        RenderApp,
    },
};

use super::visual_config::VisualConfig;

/// Handle to the side-effect shader.
const SIDE_EFFECT_SHADER_HANDLE: Handle<Shader> =
    Handle::weak_from_u128(0x3c91e4a7d20b4f6e8a15c7b9d2e04f61);

/// Contrast, tint and vignette strength of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenEffect {
    /// Contrast boost in percent, 0 is neutral
    pub contrast: f32,
    /// Multiplied into every pixel, white is neutral
    pub color_filter: Vec3,
    pub vignette_intensity: f32,
}

impl ScreenEffect {
    pub const NONE: Self = Self {
        contrast: 0.0,
        color_filter: Vec3::ONE,
        vignette_intensity: 0.0,
    };

    /// Short blurry-red flash after drinking one potion too many.
    pub const OVERDOSE: Self = Self {
        contrast: 100.0,
        color_filter: Vec3::new(1.0, 0.2, 0.2),
        vignette_intensity: 0.9,
    };
}

impl Default for ScreenEffect {
    fn default() -> Self {
        Self::NONE
    }
}

/// Current screen distortion from potion side effects.
///
/// `permanent` only ever escalates during a run. An overdose temporarily
/// overrides it until its timer runs out.
#[derive(Resource, Debug, Default)]
pub struct SideEffectVisuals {
    pub permanent: ScreenEffect,
    pub overdose: Option<Timer>,
}

impl SideEffectVisuals {
    /// Show the overdose effect for `duration` seconds.
    pub fn trigger_overdose(&mut self, duration: f32) {
        self.overdose = Some(Timer::from_seconds(duration.max(0.0), TimerMode::Once));
    }

    /// The effect that should be on screen right now.
    pub fn current(&self) -> ScreenEffect {
        match &self.overdose {
            Some(timer) if !timer.finished() => ScreenEffect::OVERDOSE,
            _ => self.permanent,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Plugin that adds the side-effect post-process pass.
pub struct SideEffectPostProcessPlugin;

impl Plugin for SideEffectPostProcessPlugin {
    fn build(&self, app: &mut App) {
        load_internal_asset!(
            app,
            SIDE_EFFECT_SHADER_HANDLE,
            "../../assets/shaders/side_effects.wgsl",
            Shader::from_wgsl
        );

        app.add_plugins((
            ExtractComponentPlugin::<SideEffectSettings>::default(),
            UniformComponentPlugin::<SideEffectSettings>::default(),
        ))
        .init_resource::<SideEffectVisuals>()
        .add_systems(Update, (tick_overdose, sync_side_effect_settings).chain());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_render_graph_node::<ViewNodeRunner<SideEffectNode>>(Core2d, SideEffectLabel)
            .add_render_graph_edges(
                Core2d,
                (
                    Node2d::Tonemapping,
                    SideEffectLabel,
                    Node2d::EndMainPassPostProcessing,
                ),
            );
    }

    fn finish(&self, app: &mut App) {
        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app.init_resource::<SideEffectPipeline>();
    }
}

/// Label for the side-effect render node.
#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
struct SideEffectLabel;

/// Uniform for the side-effect pass. Add this component to the camera.
#[derive(Component, Clone, Copy, ExtractComponent, ShaderType)]
pub struct SideEffectSettings {
    /// rgb multiplier, alpha unused
    pub color_filter: Vec4,
    /// Contrast boost in percent
    pub contrast: f32,
    pub vignette_intensity: f32,
    pub vignette_smoothness: f32,
    /// 1.0 is a circle, lower values stretch with the aspect ratio
    pub vignette_roundness: f32,
}

impl Default for SideEffectSettings {
    fn default() -> Self {
        Self {
            color_filter: Vec4::ONE,
            contrast: 0.0,
            vignette_intensity: 0.0,
            vignette_smoothness: 0.7,
            vignette_roundness: 0.9,
        }
    }
}

impl SideEffectSettings {
    pub fn from_config(config: &VisualConfig) -> Self {
        Self {
            vignette_smoothness: config.vignette_smoothness,
            vignette_roundness: config.vignette_roundness,
            ..default()
        }
    }

    /// Copy a screen effect into the uniform, keeping the vignette shape.
    pub fn apply(&mut self, effect: ScreenEffect) {
        self.color_filter = effect.color_filter.extend(1.0);
        self.contrast = effect.contrast;
        self.vignette_intensity = effect.vignette_intensity.clamp(0.0, 1.0);
    }
}

fn tick_overdose(time: Res<Time>, mut visuals: ResMut<SideEffectVisuals>) {
    let Some(timer) = visuals.overdose.as_mut() else {
        return;
    };
    timer.tick(time.delta());
    if timer.finished() {
        visuals.overdose = None;
    }
}

fn sync_side_effect_settings(
    visuals: Res<SideEffectVisuals>,
    mut query: Query<&mut SideEffectSettings>,
) {
    let effect = visuals.current();
    for mut settings in &mut query {
        settings.apply(effect);
    }
}

/// The render node for the side-effect pass.
#[derive(Default)]
struct SideEffectNode;

impl ViewNode for SideEffectNode {
    type ViewQuery = (
        &'static ViewTarget,
        &'static DynamicUniformIndex<SideEffectSettings>,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, settings_index): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let side_effect_pipeline = world.resource::<SideEffectPipeline>();
        let pipeline_cache = world.resource::<PipelineCache>();

        let Some(pipeline) = pipeline_cache.get_render_pipeline(side_effect_pipeline.pipeline_id)
        else {
            return Ok(());
        };

        let settings_uniforms = world.resource::<ComponentUniforms<SideEffectSettings>>();
        let Some(settings_binding) = settings_uniforms.uniforms().binding() else {
            return Ok(());
        };

        let post_process = view_target.post_process_write();

        let bind_group = render_context.render_device().create_bind_group(
            "side_effect_bind_group",
            &side_effect_pipeline.layout,
            &BindGroupEntries::sequential((
                post_process.source,
                &side_effect_pipeline.sampler,
                settings_binding.clone(),
            )),
        );

        let mut render_pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
            label: Some("side_effect_pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: post_process.destination,
                resolve_target: None,
                ops: Operations::default(),
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_render_pipeline(pipeline);
        render_pass.set_bind_group(0, &bind_group, &[settings_index.index()]);
        render_pass.draw(0..3, 0..1);

        Ok(())
    }
}

#[derive(Resource)]
struct SideEffectPipeline {
    layout: BindGroupLayout,
    sampler: Sampler,
    pipeline_id: CachedRenderPipelineId,
}

impl FromWorld for SideEffectPipeline {
    fn from_world(world: &mut World) -> Self {
        let render_device = world.resource::<RenderDevice>();

        let layout = render_device.create_bind_group_layout(
            "side_effect_bind_group_layout",
            &BindGroupLayoutEntries::sequential(
                ShaderStages::FRAGMENT,
                (
                    texture_2d(TextureSampleType::Float { filterable: true }),
                    sampler(SamplerBindingType::Filtering),
                    uniform_buffer::<SideEffectSettings>(true),
                ),
            ),
        );

        let sampler = render_device.create_sampler(&SamplerDescriptor::default());

        let pipeline_id =
            world
                .resource_mut::<PipelineCache>()
                .queue_render_pipeline(RenderPipelineDescriptor {
                    label: Some("side_effect_pipeline".into()),
                    layout: vec![layout.clone()],
                    vertex: fullscreen_shader_vertex_state(),
                    fragment: Some(FragmentState {
                        shader: SIDE_EFFECT_SHADER_HANDLE,
                        shader_defs: vec![],
                        entry_point: "fragment".into(),
                        targets: vec![Some(ColorTargetState {
                            format: TextureFormat::Rgba8UnormSrgb,
                            blend: None,
                            write_mask: ColorWrites::ALL,
                        })],
                    }),
                    primitive: PrimitiveState::default(),
                    depth_stencil: None,
                    multisample: MultisampleState::default(),
                    push_constant_ranges: vec![],
                    zero_initialize_workgroup_memory: false,
                });

        Self {
            layout,
            sampler,
            pipeline_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overdose_overrides_permanent_effect_until_it_ends() {
        let mut visuals = SideEffectVisuals {
            permanent: ScreenEffect {
                contrast: 10.0,
                color_filter: Vec3::new(1.0, 0.9, 0.9),
                vignette_intensity: 0.3,
            },
            overdose: None,
        };
        assert_eq!(visuals.current().contrast, 10.0);

        visuals.trigger_overdose(2.0);
        assert_eq!(visuals.current(), ScreenEffect::OVERDOSE);

        if let Some(timer) = visuals.overdose.as_mut() {
            timer.tick(std::time::Duration::from_secs_f32(2.5));
        }
        assert_eq!(visuals.current().contrast, 10.0);
    }

    #[test]
    fn vignette_is_clamped_in_uniform() {
        let mut settings = SideEffectSettings::default();
        settings.apply(ScreenEffect {
            contrast: 50.0,
            color_filter: Vec3::new(1.0, 0.5, 0.5),
            vignette_intensity: 1.8,
        });
        assert_eq!(settings.vignette_intensity, 1.0);
        assert_eq!(settings.color_filter, Vec4::new(1.0, 0.5, 0.5, 1.0));
        assert_eq!(settings.vignette_smoothness, 0.7);
    }

    #[test]
    fn uniform_matches_shader_layout() {
        // color_filter vec4 followed by four f32 fields
        assert_eq!(SideEffectSettings::min_size().get(), 32);
    }
}
