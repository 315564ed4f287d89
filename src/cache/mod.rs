//! 缓存层
//!
//! ObjectCache 后端以插件形式注册（moka 内存缓存 / redis），
//! 启动时按配置选择，redis 不可用时回退到 moka。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个 ObjectCache 插件
///
/// 在进程启动时（ctor）把构造函数写入注册表，构造函数本身惰性执行。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new().map_err(|e| {
                                $crate::errors::SchoolSystemError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}
